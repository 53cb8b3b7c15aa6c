use amm_index_domain::entities::{Bundle, Exchange, ExchangePair, ExchangeToken, Pair, Token};
use std::collections::HashMap;

/// A load result carrying the entity and whether it was found.
///
/// On a miss the entity is a zero-initialized placeholder; callers must
/// branch on `exists` rather than inspect field values.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    /// The stored record, or a placeholder when `exists` is false.
    pub entity: T,
    /// Whether the record was present in the store.
    pub exists: bool,
}

impl<T> Loaded<T> {
    fn existing(entity: T) -> Self {
        Self {
            entity,
            exists: true,
        }
    }

    fn missing(entity: T) -> Self {
        Self {
            entity,
            exists: false,
        }
    }
}

/// In-memory entity repository.
///
/// Exclusive, single-writer access during a sync transition is assumed;
/// there is no interior locking.
#[derive(Debug, Default)]
pub struct EntityStore {
    tokens: HashMap<String, Token>,
    // keyed by (token, exchange)
    exchange_tokens: HashMap<(String, String), ExchangeToken>,
    // keyed by canonical (token0, token1)
    pairs: HashMap<(String, String), Pair>,
    // keyed by pool address
    exchange_pairs: HashMap<String, ExchangePair>,
    // (token0, token1, exchange) -> pool address
    pool_index: HashMap<(String, String, String), String>,
    exchanges: HashMap<String, Exchange>,
    // keyed by exchange
    bundles: HashMap<String, Bundle>,
}

impl EntityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_token(&self, address: &str) -> Loaded<Token> {
        match self.tokens.get(address) {
            Some(token) => Loaded::existing(token.clone()),
            None => Loaded::missing(Token::placeholder(address)),
        }
    }

    pub fn save_token(&mut self, token: Token) {
        self.tokens.insert(token.address.clone(), token);
    }

    pub fn load_exchange_token(&self, token: &str, exchange: &str) -> Loaded<ExchangeToken> {
        let key = (token.to_string(), exchange.to_string());
        match self.exchange_tokens.get(&key) {
            Some(record) => Loaded::existing(record.clone()),
            None => Loaded::missing(ExchangeToken::placeholder(token, exchange)),
        }
    }

    pub fn save_exchange_token(&mut self, record: ExchangeToken) {
        let key = (record.token.clone(), record.exchange.clone());
        self.exchange_tokens.insert(key, record);
    }

    /// Loads the global canonical pair; `token0`/`token1` must already be
    /// in canonical order.
    pub fn load_pair(&self, token0: &str, token1: &str) -> Loaded<Pair> {
        let key = (token0.to_string(), token1.to_string());
        match self.pairs.get(&key) {
            Some(pair) => Loaded::existing(pair.clone()),
            None => Loaded::missing(Pair::placeholder(token0, token1)),
        }
    }

    pub fn save_pair(&mut self, pair: Pair) {
        let key = (pair.token0.clone(), pair.token1.clone());
        self.pairs.insert(key, pair);
    }

    pub fn load_exchange_pair(&self, address: &str) -> Loaded<ExchangePair> {
        match self.exchange_pairs.get(address) {
            Some(pool) => Loaded::existing(pool.clone()),
            None => Loaded::missing(ExchangePair::placeholder(address)),
        }
    }

    /// Resolves a pool by its canonically-ordered token pair within one
    /// exchange. Callers must pass the same order used at creation.
    pub fn find_exchange_pair(
        &self,
        token0: &str,
        token1: &str,
        exchange: &str,
    ) -> Loaded<ExchangePair> {
        let key = (
            token0.to_string(),
            token1.to_string(),
            exchange.to_string(),
        );
        match self
            .pool_index
            .get(&key)
            .and_then(|address| self.exchange_pairs.get(address))
        {
            Some(pool) => Loaded::existing(pool.clone()),
            None => {
                let mut pool = ExchangePair::placeholder("");
                pool.token0 = token0.to_string();
                pool.token1 = token1.to_string();
                pool.exchange = exchange.to_string();
                Loaded::missing(pool)
            }
        }
    }

    pub fn save_exchange_pair(&mut self, pool: ExchangePair) {
        let index_key = (
            pool.token0.clone(),
            pool.token1.clone(),
            pool.exchange.clone(),
        );
        self.pool_index.insert(index_key, pool.address.clone());
        self.exchange_pairs.insert(pool.address.clone(), pool);
    }

    pub fn load_exchange(&self, address: &str) -> Loaded<Exchange> {
        match self.exchanges.get(address) {
            Some(exchange) => Loaded::existing(exchange.clone()),
            None => Loaded::missing(Exchange::placeholder(address)),
        }
    }

    pub fn save_exchange(&mut self, exchange: Exchange) {
        self.exchanges.insert(exchange.address.clone(), exchange);
    }

    pub fn load_bundle(&self, exchange: &str) -> Loaded<Bundle> {
        match self.bundles.get(exchange) {
            Some(bundle) => Loaded::existing(bundle.clone()),
            None => Loaded::missing(Bundle::placeholder(exchange)),
        }
    }

    pub fn save_bundle(&mut self, bundle: Bundle) {
        self.bundles.insert(bundle.exchange.clone(), bundle);
    }

    /// All stored exchanges, for reporting.
    pub fn exchanges(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.values()
    }

    /// All stored pools, for reporting.
    pub fn exchange_pairs(&self) -> impl Iterator<Item = &ExchangePair> {
        self.exchange_pairs.values()
    }

    /// All stored tokens, for reporting.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }
}
