//! The reserve-sync state transition.

use crate::pricing;
use crate::sync::events::ReserveUpdate;
use amm_index_domain::{Amount, PricingConfig};
use amm_index_store::{EntityStore, Loaded};
use primitive_types::U256;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, warn};

/// Processes reserve-update events against the entity store.
///
/// Owns the store for the duration of the run: one event is handled to
/// completion, all loads and saves included, before the next is
/// admitted.
pub struct SyncProcessor {
    config: Arc<PricingConfig>,
    store: EntityStore,
}

impl SyncProcessor {
    pub fn new(config: Arc<PricingConfig>, store: EntityStore) -> Self {
        Self { config, store }
    }

    #[must_use]
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Releases the store after a run.
    #[must_use]
    pub fn into_store(self) -> EntityStore {
        self.store
    }

    /// Applies one reserve update.
    ///
    /// Never fails: missing records are logged and replaced by
    /// placeholders, out-of-range amounts scale to 0, and every division
    /// is zero-guarded. The exchange-level liquidity total is a pure
    /// accumulation, so the caller must deliver each event exactly once
    /// and in on-chain order.
    pub fn handle_reserve_update(&mut self, event: &ReserveUpdate) {
        let loaded_pool = self.store.load_exchange_pair(&event.pool_address);
        if !loaded_pool.exists {
            warn!(
                pool = %event.pool_address,
                "reserve update for unregistered pool, continuing with placeholder data"
            );
        }
        let mut pool = loaded_pool.entity;

        let mut exchange = required(
            self.store.load_exchange(&pool.exchange),
            "exchange",
            &pool.exchange,
        );
        let mut token0 = required(self.store.load_token(&pool.token0), "token", &pool.token0);
        let mut token1 = required(self.store.load_token(&pool.token1), "token", &pool.token1);
        let mut ex_token0 = required(
            self.store.load_exchange_token(&pool.token0, &pool.exchange),
            "exchange token",
            &pool.token0,
        );
        let mut ex_token1 = required(
            self.store.load_exchange_token(&pool.token1, &pool.exchange),
            "exchange token",
            &pool.token1,
        );

        let prior_reserve0 = pool.reserve0;
        let prior_reserve1 = pool.reserve1;

        // reset the running totals before folding in the new reserves
        token0.total_liquidity -= prior_reserve0;
        token1.total_liquidity -= prior_reserve1;
        ex_token0.total_liquidity -= prior_reserve0;
        ex_token1.total_liquidity -= prior_reserve1;

        pool.reserve0 = scale_reserve(event.reserve0, token0.decimals, &pool.address, "reserve0");
        pool.reserve1 = scale_reserve(event.reserve1, token1.decimals, &pool.address, "reserve1");
        pool.update_prices();
        self.store.save_exchange_pair(pool.clone());

        // fold this pool's delta into the canonical pair the oracle reads
        let mut pair = self.store.load_pair(&pool.token0, &pool.token1).entity;
        pair.reserve0 += pool.reserve0 - prior_reserve0;
        pair.reserve1 += pool.reserve1 - prior_reserve1;
        pair.update_prices();
        self.store.save_pair(pair.clone());

        ex_token0.eth_price = pricing::eth_per_exchange_token(&self.store, &self.config, &ex_token0);
        ex_token1.eth_price = pricing::eth_per_exchange_token(&self.store, &self.config, &ex_token1);
        token0.eth_price = ex_token0.eth_price;
        token1.eth_price = ex_token1.eth_price;
        self.store.save_token(token0.clone());
        self.store.save_token(token1.clone());
        self.store.save_exchange_token(ex_token0.clone());
        self.store.save_exchange_token(ex_token1.clone());

        let mut bundle = self.store.load_bundle(&pool.exchange).entity;
        bundle.value = pricing::eth_price_in_usd(&self.store, &self.config);
        self.store.save_bundle(bundle.clone());

        let tracked_liquidity_eth = if bundle.value.is_zero() {
            Decimal::ZERO
        } else {
            pricing::tracked_liquidity_usd(
                &self.store,
                &self.config,
                pool.reserve0,
                &ex_token0,
                pool.reserve1,
                &ex_token1,
            ) / bundle.value
        };

        pool.reserve_eth = pool.reserve0 * token0.eth_price + pool.reserve1 * token1.eth_price;
        pool.reserve_usd = pool.reserve_eth * bundle.value;
        pair.reserve_eth = pair.reserve0 * token0.eth_price + pair.reserve1 * token1.eth_price;
        pair.reserve_usd = pair.reserve_eth * bundle.value;

        // pure accumulation: a replayed event double-counts, delivery
        // must be exactly-once and in on-chain order
        exchange.total_liquidity_eth += tracked_liquidity_eth;
        exchange.total_liquidity_usd = exchange.total_liquidity_eth * bundle.value;

        // re-add the updated reserves, completing the reset above
        token0.total_liquidity += pool.reserve0;
        token1.total_liquidity += pool.reserve1;
        ex_token0.total_liquidity += pool.reserve0;
        ex_token1.total_liquidity += pool.reserve1;

        self.store.save_exchange_pair(pool);
        self.store.save_pair(pair);
        self.store.save_exchange(exchange);
        self.store.save_token(token0);
        self.store.save_token(token1);
        self.store.save_exchange_token(ex_token0);
        self.store.save_exchange_token(ex_token1);

        debug!(
            pool = %event.pool_address,
            block = event.block_number,
            "reserve sync committed"
        );
    }
}

fn required<T>(loaded: Loaded<T>, kind: &'static str, id: &str) -> T {
    if !loaded.exists {
        warn!(kind, id, "required record missing, continuing with placeholder data");
    }
    loaded.entity
}

fn scale_reserve(raw: U256, decimals: u8, pool: &str, side: &'static str) -> Decimal {
    match Amount::new(raw, decimals).to_decimal() {
        Ok(value) => value,
        Err(error) => {
            warn!(pool = %pool, side, %error, "reserve exceeds decimal range, treating as zero");
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amm_index_domain::ordering::sort_tokens;
    use amm_index_domain::{Bundle, Exchange, ExchangePair, ExchangeToken, Pair, Token};
    use chrono::DateTime;
    use rust_decimal_macros::dec;

    const EXCHANGE: &str = "0xfac";

    fn event(pool: &str, reserve0: U256, reserve1: U256) -> ReserveUpdate {
        ReserveUpdate {
            pool_address: pool.to_string(),
            reserve0,
            reserve1,
            block_number: 10_008_355,
            timestamp: DateTime::from_timestamp(1_589_500_000, 0).unwrap(),
        }
    }

    fn register_token(store: &mut EntityStore, address: &str, decimals: u8) {
        store.save_token(Token::new(address, "", "", decimals));
        store.save_exchange_token(ExchangeToken::new(address, EXCHANGE));
    }

    fn register_pool(store: &mut EntityStore, address: &str, token_a: &str, token_b: &str) {
        let (token0, token1) = sort_tokens(token_a, token_b);
        let mut pool = ExchangePair::placeholder(address);
        pool.exchange = EXCHANGE.to_string();
        pool.token0 = token0.to_string();
        pool.token1 = token1.to_string();
        store.save_exchange_pair(pool);
        store.save_pair(Pair::placeholder(token0, token1));
    }

    fn register_exchange(store: &mut EntityStore) {
        store.save_exchange(Exchange::placeholder(EXCHANGE));
        store.save_bundle(Bundle::placeholder(EXCHANGE));
    }

    fn processor_with(store: EntityStore) -> SyncProcessor {
        SyncProcessor::new(Arc::new(PricingConfig::mainnet()), store)
    }

    #[test]
    fn test_sync_scales_reserves_and_recomputes_prices() {
        let mut store = EntityStore::new();
        register_exchange(&mut store);
        register_token(&mut store, "0xaa", 18);
        register_token(&mut store, "0xbb", 6);
        register_pool(&mut store, "0xpool", "0xaa", "0xbb");

        let mut processor = processor_with(store);
        processor.handle_reserve_update(&event(
            "0xpool",
            U256::from(5_000_000_000_000_000_000u64),
            U256::from(10_000_000u64),
        ));

        let pool = processor.store().load_exchange_pair("0xpool").entity;
        assert_eq!(pool.reserve0, dec!(5));
        assert_eq!(pool.reserve1, dec!(10));
        assert_eq!(pool.token0_price, dec!(0.5));
        assert_eq!(pool.token1_price, dec!(2));
    }

    #[test]
    fn test_sync_zero_reserve_guards_prices() {
        let mut store = EntityStore::new();
        register_exchange(&mut store);
        register_token(&mut store, "0xaa", 18);
        register_token(&mut store, "0xbb", 6);
        register_pool(&mut store, "0xpool", "0xaa", "0xbb");

        let mut processor = processor_with(store);
        processor.handle_reserve_update(&event(
            "0xpool",
            U256::from(5_000_000_000_000_000_000u64),
            U256::zero(),
        ));

        let pool = processor.store().load_exchange_pair("0xpool").entity;
        assert_eq!(pool.token0_price, Decimal::ZERO);
        assert_eq!(pool.token1_price, Decimal::ZERO);
    }

    #[test]
    fn test_liquidity_conservation_on_resync() {
        let mut store = EntityStore::new();
        register_exchange(&mut store);
        register_token(&mut store, "0xaa", 18);
        register_token(&mut store, "0xbb", 6);
        register_pool(&mut store, "0xpool", "0xaa", "0xbb");

        let mut processor = processor_with(store);
        processor.handle_reserve_update(&event(
            "0xpool",
            U256::from(5_000_000_000_000_000_000u64),
            U256::from(10_000_000u64),
        ));
        let before = processor.store().load_token("0xaa").entity.total_liquidity;
        assert_eq!(before, dec!(5));

        processor.handle_reserve_update(&event(
            "0xpool",
            U256::from(8_000_000_000_000_000_000u64),
            U256::from(12_000_000u64),
        ));
        let after = processor.store().load_token("0xaa").entity.total_liquidity;

        // the token sits in exactly one pool: the total moves by R_new - R_old
        assert_eq!(after, dec!(8));
        assert_eq!(after - before, dec!(3));
    }

    #[test]
    fn test_token_total_matches_sum_over_pools() {
        let mut store = EntityStore::new();
        register_exchange(&mut store);
        register_token(&mut store, "0xaa", 18);
        register_token(&mut store, "0xbb", 6);
        register_token(&mut store, "0xcc", 6);
        register_pool(&mut store, "0xpool1", "0xaa", "0xbb");
        register_pool(&mut store, "0xpool2", "0xaa", "0xcc");

        let mut processor = processor_with(store);
        processor.handle_reserve_update(&event(
            "0xpool1",
            U256::from(5_000_000_000_000_000_000u64),
            U256::from(10_000_000u64),
        ));
        processor.handle_reserve_update(&event(
            "0xpool2",
            U256::from(7_000_000_000_000_000_000u64),
            U256::from(20_000_000u64),
        ));
        processor.handle_reserve_update(&event(
            "0xpool1",
            U256::from(4_000_000_000_000_000_000u64),
            U256::from(9_000_000u64),
        ));

        // incremental bookkeeping must equal summation over pools
        let store = processor.store();
        let total = store.load_token("0xaa").entity.total_liquidity;
        let sum = store.load_exchange_pair("0xpool1").entity.reserve0
            + store.load_exchange_pair("0xpool2").entity.reserve0;
        assert_eq!(total, sum);
        assert_eq!(total, dec!(11));
    }

    #[test]
    fn test_replay_is_not_idempotent_for_exchange_liquidity() {
        let config = PricingConfig::mainnet();
        let mut store = EntityStore::new();
        register_exchange(&mut store);

        // a WETH pool against an unlisted token; WETH side is tracked doubled
        let other = "0xffffffffffffffffffffffffffffffffffffffff";
        register_token(&mut store, &config.weth.clone(), 18);
        register_token(&mut store, other, 18);
        register_pool(&mut store, "0xpool", &config.weth.clone(), other);

        // a USDC/WETH reference pair so the oracle reports 2000
        let (usdc0, usdc1) = config.usdc_weth_pair();
        let mut reference = Pair::placeholder(usdc0, usdc1);
        reference.reserve0 = dec!(2000000);
        reference.reserve1 = dec!(1000);
        reference.update_prices();
        store.save_pair(reference);

        let mut processor = processor_with(store);
        let update = event(
            "0xpool",
            U256::from(10_000_000_000_000_000_000u64),
            U256::from(10_000_000_000_000_000_000u64),
        );

        processor.handle_reserve_update(&update);
        let first = processor
            .store()
            .load_exchange(EXCHANGE)
            .entity
            .total_liquidity_eth;
        // 10 WETH doubled
        assert_eq!(first, dec!(20));

        // replaying the identical event accumulates again; this guards the
        // exactly-once delivery contract against an accidental "fix"
        processor.handle_reserve_update(&update);
        let second = processor
            .store()
            .load_exchange(EXCHANGE)
            .entity
            .total_liquidity_eth;
        assert_eq!(second, dec!(40));
        assert_ne!(first, second);
    }

    #[test]
    fn test_sync_refreshes_bundle_from_reference_pool() {
        let config = PricingConfig::mainnet();
        let mut store = EntityStore::new();
        register_exchange(&mut store);

        let (usdc, weth) = (config.usdc.clone(), config.weth.clone());
        register_token(&mut store, &usdc, 6);
        register_token(&mut store, &weth, 18);
        register_pool(&mut store, "0xpool", &usdc, &weth);

        let mut processor = processor_with(store);
        // 2,000,000 USDC / 1,000 WETH
        processor.handle_reserve_update(&event(
            "0xpool",
            U256::from(2_000_000_000_000u64),
            U256::from(1_000_000_000_000_000_000_000u128),
        ));

        let bundle = processor.store().load_bundle(EXCHANGE).entity;
        assert_eq!(bundle.value, dec!(2000));

        // first sync resolves prices against the stale pool reserve_eth;
        // the second sees the refreshed pool and prices USDC off WETH
        processor.handle_reserve_update(&event(
            "0xpool",
            U256::from(2_000_000_000_000u64),
            U256::from(1_000_000_000_000_000_000_000u128),
        ));
        let usdc_token = processor
            .store()
            .load_exchange_token(&usdc, EXCHANGE)
            .entity;
        assert_eq!(usdc_token.eth_price, dec!(0.0005));

        let pool = processor.store().load_exchange_pair("0xpool").entity;
        assert!(pool.reserve_usd > Decimal::ZERO);
    }

    #[test]
    fn test_unregistered_pool_degrades_without_panicking() {
        let mut processor = processor_with(EntityStore::new());
        processor.handle_reserve_update(&event(
            "0xghost",
            U256::from(1_000_000u64),
            U256::from(2_000_000u64),
        ));

        // the degraded transition still commits the scaled reserves
        let pool = processor.store().load_exchange_pair("0xghost").entity;
        assert!(processor.store().load_exchange_pair("0xghost").exists);
        assert!(pool.reserve0 > Decimal::ZERO);
        assert_eq!(pool.exchange, "");
    }

    #[test]
    fn test_prices_and_reserves_stay_non_negative() {
        let mut store = EntityStore::new();
        register_exchange(&mut store);
        register_token(&mut store, "0xaa", 18);
        register_token(&mut store, "0xbb", 6);
        register_pool(&mut store, "0xpool", "0xaa", "0xbb");

        let mut processor = processor_with(store);
        for (r0, r1) in [
            (U256::from(5_000_000_000_000_000_000u64), U256::zero()),
            (U256::zero(), U256::from(10_000_000u64)),
            (U256::zero(), U256::zero()),
        ] {
            processor.handle_reserve_update(&event("0xpool", r0, r1));
            let pool = processor.store().load_exchange_pair("0xpool").entity;
            assert!(pool.reserve0 >= Decimal::ZERO);
            assert!(pool.reserve1 >= Decimal::ZERO);
            assert!(pool.token0_price >= Decimal::ZERO);
            assert!(pool.token1_price >= Decimal::ZERO);
            assert!(pool.reserve_eth >= Decimal::ZERO);
            assert!(pool.reserve_usd >= Decimal::ZERO);
        }
    }
}
