//! Portuguese stop-word list.

use std::collections::HashSet;
use std::sync::LazyLock;

const PORTUGUESE: &[&str] = &[
    "a", "à", "ao", "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo", "as", "às",
    "até", "bem", "cada", "coisa", "com", "como", "contra", "da", "das", "de", "dela", "delas",
    "dele", "deles", "depois", "desde", "dessa", "dessas", "desse", "desses", "desta", "destas",
    "deste", "destes", "do", "dos", "e", "é", "ela", "elas", "ele", "eles", "em", "embora",
    "enquanto", "entre", "era", "eram", "éramos", "essa", "essas", "esse", "esses", "esta",
    "está", "estamos", "estão", "estar", "estas", "estava", "estavam", "estávamos", "este",
    "esteja", "estejam", "estes", "esteve", "estive", "estivemos", "estiveram", "estou", "eu",
    "foi", "fomos", "for", "foram", "fosse", "fossem", "fui", "há", "isso", "isto", "já", "lá",
    "lhe", "lhes", "logo", "mais", "mas", "me", "mesma", "mesmas", "mesmo", "mesmos", "meu",
    "meus", "minha", "minhas", "muita", "muitas", "muito", "muitos", "na", "nas", "nem", "nessa",
    "nesse", "nesta", "neste", "no", "nos", "nós", "nossa", "nossas", "nosso", "nossos", "num",
    "numa", "o", "onde", "os", "ou", "para", "pela", "pelas", "pelo", "pelos", "per", "perante",
    "pois", "por", "porque", "porquê", "pouca", "poucas", "pouco", "poucos", "qual", "quais",
    "quando", "quanto", "que", "quê", "quem", "se", "seja", "sejam", "sem", "ser", "será",
    "serão", "seria", "seriam", "seu", "seus", "só", "sob", "sobre", "somos", "sou", "sua",
    "suas", "também", "tampouco", "te", "tem", "têm", "temos", "tenho", "ter", "teu", "teus",
    "teve", "tinha", "tinham", "tive", "todas", "todo", "todos", "tu", "tua", "tuas", "tudo",
    "um", "uma", "umas", "uns", "vai", "vão", "vos", "vós", "você", "vocês", "vossa", "vosso",
];

static PORTUGUESE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| PORTUGUESE.iter().copied().collect());

/// Whether a lower-cased token is a Portuguese stop-word.
pub fn is_stop_word(token: &str) -> bool {
    PORTUGUESE_SET.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_words_are_stop_words() {
        for word in ["como", "você", "está", "isso", "é", "um", "com", "por", "quê"] {
            assert!(is_stop_word(word), "{word} should be a stop-word");
        }
    }

    #[test]
    fn content_words_are_kept() {
        for word in ["olá", "hoje", "teste", "certo", "feliz", "preço", "pedido", "ajuda"] {
            assert!(!is_stop_word(word), "{word} should not be a stop-word");
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(!is_stop_word("Como"));
    }
}
