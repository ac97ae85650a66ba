//! Stopword and blocklist filtering.
//!
//! The filter content is fixed, curated list data for the configured
//! language (Portuguese), replicated verbatim from the curation that the
//! statistics were tuned against, including its duplicated entries and
//! the deliberate asymmetry between token-level filtering (base + extra
//! stopwords) and graph-node filtering (base stopwords + blocklist only).

use rustc_hash::FxHashSet;

/// Core Portuguese stopwords. Applied to tokens and to graph nodes.
const STOPWORDS: &[&str] = &[
    "de", "a", "o", "que", "e", "do", "da", "em", "um", "para", "com", "não", "uma", "os", "no",
    "se", "na", "por", "mais", "as", "dos", "como", "mas", "ao", "ele", "das", "à", "seu", "sua",
    "ou", "quando", "muito", "nos", "já", "eu", "também", "só", "pelo", "pela", "até", "isso",
    "ela", "entre", "depois", "sem", "mesmo", "aos", "seus", "quem", "nas", "me", "esse", "eles",
    "você", "essa", "num", "nem", "suas", "meu", "às", "minha", "numa", "pelos", "elas", "qual",
    "nós", "lhe", "deles", "essas", "esses", "pelas", "este", "dele", "tu", "te", "vocês", "vos",
    "lhes", "meus", "minhas", "teu", "tua", "teus", "tuas", "nosso", "nossa", "nossos", "nossas",
    "dela", "delas", "esta", "estes", "estas", "aquele", "aquela", "aqueles", "aquelas", "isto",
    "aquilo", "estou", "está", "estamos", "estão", "estive", "esteve", "estivemos", "estiveram",
    "estava", "estávamos", "estavam", "estivera", "estivéramos", "hajam", "havemos", "hei",
    "houve", "houvemos", "houveram", "houvera", "houvéramos", "haja", "hajamos", "hajas", "tinha",
    "tínhamos", "tinham", "tive", "teve", "tivemos", "tiveram", "tivera", "tivéramos", "tenho",
    "tem", "temos", "tém", "tinha", "tinhas", "tínhamos", "tinham", "tiveste", "tivestes",
    "tiver", "tiveres", "tivermos", "tiverem", "terei", "terá", "teremos", "terão", "teria",
    "teríamos", "teriam", "sou", "somos", "são", "era", "éramos", "eram", "fui", "foi", "fomos",
    "foram", "fora", "fôramos", "seja", "sejamos", "sejam", "serei", "será", "seremos", "serão",
    "seria", "seríamos", "seriam", "tenha", "tenhamos", "tenham", "tendo", "ter", "ser", "foi",
    "como", "mas", "foi", "ao", "das",
];

/// Additional stopwords that surface as lemmatized forms, plus English
/// pollution and single letters. Applied to tokens only.
const EXTRA_STOPWORDS: &[&str] = &[
    "o", "a", "os", "as", "um", "uma", "uns", "umas", "de", "do", "da", "dos", "das", "em", "no",
    "na", "nos", "nas", "por", "pelo", "pela", "pelos", "pelas", "para", "pra", "com", "e", "ou",
    "mas", "nem", "que", "se", "não", "sim", "eu", "tu", "ele", "ela", "nós", "vós", "eles",
    "elas", "me", "te", "se", "nos", "vos", "lhe", "lhes", "meu", "teu", "seu", "nosso", "vosso",
    "este", "esse", "aquele", "aquilo", "isso", "isto", "ser", "estar", "ter", "haver", "ir",
    "vir", "the", "and", "of", "in", "to", "for", "on", "with", "as", "by", "at", "is", "it",
    "that", "this", "was", "are", "from", "be", "or", "an", "s", "d", "v", "p", "m", "c", "l",
    "n", "g", "b", "j", "r", "x", "t", "f", "h", "k", "w", "y", "z", "ª", "º", "°", "etc",
];

/// Markup residue, citation boilerplate, and other curated noise.
/// Applied to graph nodes and the noun heuristic.
const MANUAL_BLOCK: &[&str] = &[
    "online", "disponível", "acesso", "consultado", "original", "arquivado", "ligação", "externa",
    "bibliografia", "referência", "sobre", "editar", "código", "font", "span", "div", "style",
    "class", "align", "width", "height", "valign", "bgcolor", "rowspan", "colspan", "borda",
    "solid", "background", "padding", "margin", "center", "right", "left", "small", "big", "sup",
    "sub", "http", "https", "www", "com", "org", "net", "edu", "gov", "html", "htm", "php",
    "aspx", "jsp", "doi", "isbn", "issn", "pmid", "arxiv", "pdf", "jpg", "png", "svg", "gif",
    "jpeg", "and", "the", "in", "of", "to", "new", "time", "music", "on", "yes", "no", "for",
    "by", "with", "from", "at", "his", "her", "he", "she", "it", "is", "are", "was", "were",
    "that", "this", "e", "s", "a", "d", "v", "of", "world", "single", "casar", "usar", "km",
    "wikipedia", "c",
];

/// Words the noun heuristic always accepts, overriding every other rule.
const MANUAL_ALLOW: &[&str] = &["ano", "lisboa", "portugal", "brasil", "mundo", "exemplo"];

/// Curated word filters for token normalization, graph-node selection,
/// and the noun heuristic.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Core stopwords (`STOPWORDS`).
    base: FxHashSet<String>,
    /// Base plus lemmatized-form extras: the token-level set.
    all: FxHashSet<String>,
    block: FxHashSet<String>,
    allow: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::curated()
    }
}

impl StopwordFilter {
    /// The replicated curated filter content.
    pub fn curated() -> Self {
        let base: FxHashSet<String> = STOPWORDS.iter().map(|w| w.to_string()).collect();
        let mut all = base.clone();
        all.extend(EXTRA_STOPWORDS.iter().map(|w| w.to_string()));
        Self {
            base,
            all,
            block: MANUAL_BLOCK.iter().map(|w| w.to_string()).collect(),
            allow: MANUAL_ALLOW.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// An empty filter that rejects nothing. Useful in tests.
    pub fn empty() -> Self {
        Self {
            base: FxHashSet::default(),
            all: FxHashSet::default(),
            block: FxHashSet::default(),
            allow: FxHashSet::default(),
        }
    }

    /// A filter with explicit token stopwords and no block/allow lists.
    pub fn from_list(words: &[&str]) -> Self {
        let set: FxHashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        Self {
            base: set.clone(),
            all: set,
            block: FxHashSet::default(),
            allow: FxHashSet::default(),
        }
    }

    /// Token-level rejection: base or extra stopword.
    ///
    /// Checked both before and after lemmatization so that inflected forms
    /// and their lemmas are caught alike.
    pub fn filters_token(&self, word: &str) -> bool {
        self.all.contains(word)
    }

    /// Graph-node rejection: core stopword or blocklisted.
    ///
    /// Note the narrower stopword set than [`Self::filters_token`]: this
    /// mirrors the curated filter content as given.
    pub fn blocks_node(&self, word: &str) -> bool {
        self.base.contains(word) || self.block.contains(word)
    }

    pub fn is_base_stopword(&self, word: &str) -> bool {
        self.base.contains(word)
    }

    pub fn is_blocked(&self, word: &str) -> bool {
        self.block.contains(word)
    }

    pub fn is_allowlisted(&self, word: &str) -> bool {
        self.allow.contains(word)
    }

    /// Number of distinct token-level stopwords.
    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_stopwords_filtered() {
        let filter = StopwordFilter::curated();
        assert!(filter.filters_token("de"));
        assert!(filter.filters_token("que"));
        assert!(!filter.filters_token("cidade"));
    }

    #[test]
    fn test_extra_stopwords_filter_tokens_but_not_nodes() {
        let filter = StopwordFilter::curated();
        // "estar" is only in the extra set.
        assert!(filter.filters_token("estar"));
        assert!(!filter.blocks_node("estar"));
    }

    #[test]
    fn test_blocklist_blocks_nodes() {
        let filter = StopwordFilter::curated();
        assert!(filter.blocks_node("wikipedia"));
        assert!(filter.blocks_node("isbn"));
        // Blocklisted markup residue is not a token-level stopword.
        assert!(!filter.filters_token("bgcolor"));
        assert!(filter.is_blocked("bgcolor"));
    }

    #[test]
    fn test_allowlist() {
        let filter = StopwordFilter::curated();
        assert!(filter.is_allowlisted("portugal"));
        assert!(!filter.is_allowlisted("cidade"));
    }

    #[test]
    fn test_empty_filter() {
        let filter = StopwordFilter::empty();
        assert!(!filter.filters_token("de"));
        assert!(!filter.blocks_node("wikipedia"));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_from_list() {
        let filter = StopwordFilter::from_list(&["Custom", "words"]);
        assert!(filter.filters_token("custom"));
        assert!(filter.blocks_node("words"));
        assert!(!filter.filters_token("de"));
    }
}
