// src/common/i18n.rs

use std::collections::HashMap;

use anyhow::Context;

use crate::middleware::i18n::Locale;

// Catálogos embutidos no binário (chave -> mensagem)
const EMBEDDED_CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.json")),
    ("zh", include_str!("../../locales/zh.json")),
];

/// Guarda as mensagens traduzidas e resolve uma chave para o idioma do cliente.
///
/// Ordem de busca: idioma pedido -> idioma padrão -> a própria chave.
#[derive(Debug)]
pub struct I18nStore {
    default_lang: String,
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl I18nStore {
    pub fn from_embedded(default_lang: &str) -> anyhow::Result<Self> {
        let mut catalogs = HashMap::new();

        for (lang, raw) in EMBEDDED_CATALOGS {
            let catalog: HashMap<String, String> = serde_json::from_str(raw)
                .with_context(|| format!("Catálogo de idioma '{}' inválido", lang))?;
            catalogs.insert(lang.to_string(), catalog);
        }

        if !catalogs.contains_key(default_lang) {
            anyhow::bail!("Idioma padrão '{}' não possui catálogo", default_lang);
        }

        Ok(Self {
            default_lang: default_lang.to_string(),
            catalogs,
        })
    }

    pub fn translate(&self, lang: Option<&str>, key: &str, args: &[(&str, String)]) -> String {
        let template = lang
            .and_then(|l| self.catalogs.get(l))
            .and_then(|catalog| catalog.get(key))
            .or_else(|| {
                self.catalogs
                    .get(&self.default_lang)
                    .and_then(|catalog| catalog.get(key))
            })
            .map(String::as_str)
            .unwrap_or(key);

        let mut message = template.to_string();
        for (name, value) in args {
            message = message.replace(&format!("{{{}}}", name), value);
        }
        message
    }

    /// Atalho usado pelos handlers.
    pub fn t(&self, locale: &Locale, key: &str, args: &[(&str, String)]) -> String {
        self.translate(locale.lang(), key, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> I18nStore {
        I18nStore::from_embedded("zh").unwrap()
    }

    #[test]
    fn test_translates_requested_language() {
        let store = store();
        let message = store.translate(
            Some("en"),
            "gate_in.success",
            &[("id", "TNKU1234567".to_string()), ("action", "進場".to_string())],
        );
        assert_eq!(message, "Tank TNKU1234567 processed (進場).");
    }

    #[test]
    fn test_unknown_language_falls_back_to_default() {
        let store = store();
        let message = store.translate(Some("fr"), "error.invalid_credentials", &[]);
        assert_eq!(message, "帳號或密碼錯誤");

        let message = store.translate(None, "error.invalid_credentials", &[]);
        assert_eq!(message, "帳號或密碼錯誤");
    }

    #[test]
    fn test_unknown_key_returns_key() {
        let store = store();
        assert_eq!(store.translate(Some("en"), "nope.missing", &[]), "nope.missing");
    }

    #[test]
    fn test_catalogs_have_same_keys() {
        let store = store();
        let en = &store.catalogs["en"];
        let zh = &store.catalogs["zh"];
        for key in en.keys() {
            assert!(zh.contains_key(key), "chave ausente em zh: {}", key);
        }
        assert_eq!(en.len(), zh.len());
    }

    #[test]
    fn test_rejects_default_without_catalog() {
        assert!(I18nStore::from_embedded("pt").is_err());
    }
}
