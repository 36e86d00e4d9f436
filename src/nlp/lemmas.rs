//! Lemma dictionary: inflected form → dictionary base form.
//!
//! Initialization contract (`load_or_fetch`):
//! 1. a configured file that exists is parsed;
//! 2. a configured file that is missing is downloaded from the configured
//!    URL, written to the file path, then parsed;
//! 3. with neither, only the built-in table is used.
//!
//! File format: one `form<TAB>lemma` pair per line. Blank lines and lines
//! starting with `#` are skipped. File entries override built-in ones.

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::error::NlpError;

/// Common Portuguese inflections that ship with the binary.
const BUILTIN: &[(&str, &str)] = &[
    // correr
    ("corro", "correr"),
    ("corre", "correr"),
    ("correm", "correr"),
    ("correu", "correr"),
    ("correram", "correr"),
    ("correndo", "correr"),
    ("corremos", "correr"),
    ("correremos", "correr"),
    ("corrido", "correr"),
    // precisar
    ("preciso", "precisar"),
    ("precisa", "precisar"),
    ("precisamos", "precisar"),
    ("precisam", "precisar"),
    ("precisava", "precisar"),
    ("precisei", "precisar"),
    ("precisando", "precisar"),
    // fazer
    ("faço", "fazer"),
    ("faz", "fazer"),
    ("fazem", "fazer"),
    ("fiz", "fazer"),
    ("fez", "fazer"),
    ("fizeram", "fazer"),
    ("feito", "fazer"),
    ("fazendo", "fazer"),
    // poder
    ("posso", "poder"),
    ("pode", "poder"),
    ("podem", "poder"),
    ("podemos", "poder"),
    ("pude", "poder"),
    ("poderia", "poder"),
    ("poderiam", "poder"),
    // querer
    ("quero", "querer"),
    ("quer", "querer"),
    ("querem", "querer"),
    ("queria", "querer"),
    ("quis", "querer"),
    // solicitar / enviar / receber / atualizar / verificar
    ("solicito", "solicitar"),
    ("solicitei", "solicitar"),
    ("solicitou", "solicitar"),
    ("solicitamos", "solicitar"),
    ("solicitado", "solicitar"),
    ("envio", "enviar"),
    ("enviei", "enviar"),
    ("enviou", "enviar"),
    ("enviamos", "enviar"),
    ("enviado", "enviar"),
    ("enviada", "enviar"),
    ("recebi", "receber"),
    ("recebeu", "receber"),
    ("recebemos", "receber"),
    ("recebido", "receber"),
    ("recebida", "receber"),
    ("atualize", "atualizar"),
    ("atualizei", "atualizar"),
    ("atualizou", "atualizar"),
    ("atualizado", "atualizar"),
    ("verifique", "verificar"),
    ("verifiquei", "verificar"),
    ("verificou", "verificar"),
    ("agradeço", "agradecer"),
    ("agradecemos", "agradecer"),
    ("gostaria", "gostar"),
    ("gostaríamos", "gostar"),
    ("aguardo", "aguardar"),
    ("aguardamos", "aguardar"),
    ("consigo", "conseguir"),
    ("consegui", "conseguir"),
    ("conseguimos", "conseguir"),
    ("desejo", "desejar"),
    ("desejamos", "desejar"),
    ("funciona", "funcionar"),
    ("funcionando", "funcionar"),
    // nouns
    ("pedidos", "pedido"),
    ("solicitações", "solicitação"),
    ("mensagens", "mensagem"),
    ("arquivos", "arquivo"),
    ("dúvidas", "dúvida"),
    ("problemas", "problema"),
    ("clientes", "cliente"),
    ("contas", "conta"),
    ("faturas", "fatura"),
    ("pagamentos", "pagamento"),
    ("documentos", "documento"),
    ("anexos", "anexo"),
    ("obrigada", "obrigado"),
    ("felicidades", "felicidade"),
];

/// Inflected-form to lemma lookup table.
#[derive(Debug, Clone)]
pub struct LemmaDictionary {
    entries: HashMap<String, String>,
}

impl Default for LemmaDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LemmaDictionary {
    /// Dictionary containing only the built-in entries.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(form, lemma)| ((*form).to_string(), (*lemma).to_string()))
            .collect();
        Self { entries }
    }

    /// Built-in entries extended (and overridden) by parsed `form<TAB>lemma` text.
    pub fn from_tsv(text: &str) -> Result<Self, NlpError> {
        let mut dict = Self::builtin();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut cols = line.split('\t');
            let (Some(form), Some(lemma), None) = (cols.next(), cols.next(), cols.next()) else {
                return Err(NlpError::DictionaryParse {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let (form, lemma) = (form.trim(), lemma.trim());
            if form.is_empty() || lemma.is_empty() {
                return Err(NlpError::DictionaryParse {
                    line: idx + 1,
                    content: line.to_string(),
                });
            }
            dict.entries.insert(form.to_lowercase(), lemma.to_lowercase());
        }
        Ok(dict)
    }

    /// Load the dictionary file, fetching it into `path` first when missing.
    pub async fn load_or_fetch(path: Option<&Path>, url: Option<&str>) -> Result<Self, NlpError> {
        let Some(path) = path else {
            info!(entries = BUILTIN.len(), "Using built-in lemma dictionary");
            return Ok(Self::builtin());
        };

        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            let Some(url) = url else {
                warn!(
                    path = %path.display(),
                    "Lemma dictionary not found and no download URL configured, using built-in"
                );
                return Ok(Self::builtin());
            };
            info!(path = %path.display(), url, "Lemma dictionary missing, downloading");
            let body = fetch(url).await?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| NlpError::DictionaryWrite {
                        path: parent.display().to_string(),
                        source,
                    })?;
            }
            tokio::fs::write(path, &body)
                .await
                .map_err(|source| NlpError::DictionaryWrite {
                    path: path.display().to_string(),
                    source,
                })?;
        }

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| NlpError::DictionaryRead {
                path: path.display().to_string(),
                source,
            })?;
        let dict = Self::from_tsv(&text)?;
        info!(path = %path.display(), entries = dict.len(), "Loaded lemma dictionary");
        Ok(dict)
    }

    /// Lemma for a lower-cased form, or the form itself when unknown.
    pub fn lemma<'a>(&'a self, form: &'a str) -> &'a str {
        self.entries.get(form).map(String::as_str).unwrap_or(form)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

async fn fetch(url: &str) -> Result<String, NlpError> {
    let fetch_err = |reason: String| NlpError::DictionaryFetch {
        url: url.to_string(),
        reason,
    };
    let resp = reqwest::get(url).await.map_err(|e| fetch_err(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(fetch_err(format!("HTTP {}", resp.status())));
    }
    resp.text().await.map_err(|e| fetch_err(e.to_string()))
}
