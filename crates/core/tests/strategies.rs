use std::cell::Cell;
use std::collections::HashSet;
use std::sync::Arc;

use equality_core::{
    EqualityError, EqualityStrategy, FieldInfo, HashCode, HashCodeBuilder, IntoValue,
    MULTI_VALUE, Reflect, SINGLE_VALUE, StrategyKind, Value, ValueSupplier, hash, reflect,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct P {
    x: i32,
    y: i32,
}

#[derive(Debug, Clone)]
struct Q {
    x: i32,
    y: i32,
}

reflect!(P { x, y });
reflect!(Q { x, y });

/// Only declares `x`.
struct Narrow {
    #[allow(dead_code)]
    x: i32,
}

reflect!(Narrow { x });

#[derive(Debug)]
struct Tagged {
    id: i64,
    tag: String,
}

impl ValueSupplier for Tagged {
    fn values(&self) -> Vec<Value> {
        vec![self.id.to_value(), self.tag.to_value()]
    }
}

struct Labelled(&'static str);

impl ValueSupplier for Labelled {
    fn values(&self) -> Vec<Value> {
        vec![1i64.to_value(), self.0.to_value()]
    }
}

fn init() {
    equality_observability::init_for_tests();
}

/// The delegation idiom: a type forwards `PartialEq`/`Hash` to its strategy.
struct Account {
    data: Arc<AccountData>,
    eq: EqualityStrategy<AccountData>,
}

struct AccountData {
    number: String,
    balance: Cell<i64>,
    holders: Vec<String>,
}

impl Reflect for AccountData {
    fn fields(&self) -> Vec<FieldInfo> {
        vec![
            FieldInfo::static_field("BANK_CODE"),
            FieldInfo::instance("number"),
            FieldInfo::instance("holders"),
            FieldInfo::instance("balance"),
        ]
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "number" => Some(self.number.to_value()),
            "holders" => Some(self.holders.to_value()),
            "balance" => Some(self.balance.get().to_value()),
            _ => None,
        }
    }
}

impl Account {
    fn new(number: &str, balance: i64, holders: &[&str]) -> Self {
        let data = Arc::new(AccountData {
            number: number.to_owned(),
            balance: Cell::new(balance),
            holders: holders.iter().map(|h| (*h).to_owned()).collect(),
        });
        let eq = EqualityStrategy::field_based(data.clone()).cached();
        Self { data, eq }
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.eq.equals(&other.data), Ok(true))
    }
}

impl Eq for Account {}

impl std::hash::Hash for Account {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_i32(self.eq.hash_code().unwrap_or_default());
    }
}

#[test]
fn reference_based_distinguishes_equal_contents() {
    init();
    let x = Arc::new(P { x: 1, y: 2 });
    let y = Arc::new(P { x: 1, y: 2 });
    let strategy = EqualityStrategy::reference_based(x.clone());

    assert_eq!(strategy.equals(&x), Ok(true));
    assert_eq!(strategy.equals(&y), Ok(false));
    assert_eq!(strategy.hash_code(), strategy.hash_of(&x));
}

#[test]
fn field_based_compares_across_types_with_the_same_layout() {
    init();
    let p: Arc<dyn Reflect> = Arc::new(P { x: 1, y: 2 });
    let q: Arc<dyn Reflect> = Arc::new(Q { x: 1, y: 2 });
    let by_p = EqualityStrategy::field_based(p);
    let by_q = EqualityStrategy::field_based(q.clone());

    assert_eq!(by_p.hash_code(), by_q.hash_code());
    assert_eq!(by_p.equals(&*q), Ok(true));
    assert_eq!(by_p.equals(&Q { x: 1, y: 3 }), Ok(false));
}

#[test]
fn field_based_hash_is_the_single_seed_fold_of_field_values() {
    let strategy = EqualityStrategy::field_based(Arc::new(P { x: 1, y: 2 }));
    let expected = hash(SINGLE_VALUE, &[1i32, 2]);
    assert_eq!(strategy.hash_code(), Ok(expected));
}

#[test]
fn missing_field_on_other_is_an_access_failure() {
    init();
    let p: Arc<dyn Reflect> = Arc::new(P { x: 1, y: 2 });
    let strategy = EqualityStrategy::field_based(p);
    let narrow = Narrow { x: 1 };

    assert_eq!(
        strategy.equals(&narrow),
        Err(EqualityError::field_access("y"))
    );
    assert_eq!(
        strategy.hash_of(&narrow),
        Err(EqualityError::field_access("y"))
    );
}

#[test]
fn value_based_equality_and_hash() {
    init();
    let a = EqualityStrategy::value_based(Arc::new(Tagged {
        id: 1,
        tag: "a".into(),
    }));
    let same = Tagged {
        id: 1,
        tag: "a".into(),
    };
    let different = Tagged {
        id: 1,
        tag: "b".into(),
    };

    assert_eq!(a.equals(&same), Ok(true));
    assert_eq!(a.hash_code(), a.hash_of(&same));
    assert_eq!(a.equals(&different), Ok(false));
    assert_eq!(
        a.hash_code(),
        Ok(HashCodeBuilder::hash(&1i64).and("a").code())
    );
}

#[test]
fn value_based_compares_any_suppliers() {
    let tagged: Arc<dyn ValueSupplier> = Arc::new(Tagged {
        id: 1,
        tag: "a".into(),
    });
    let strategy = EqualityStrategy::value_based(tagged);

    assert_eq!(strategy.equals(&Labelled("a")), Ok(true));
    assert_eq!(strategy.equals(&Labelled("b")), Ok(false));
}

#[test]
fn cached_hash_survives_target_mutation() {
    init();
    let account = Account::new("001", 10, &["ana"]);
    let first = account.eq.hash_code();
    account.data.balance.set(20);

    assert_eq!(account.eq.hash_code(), first);
    assert_ne!(account.eq.as_uncached().hash_code(), first);
    assert_eq!(account.eq.kind(), StrategyKind::Cached);
}

#[test]
fn delegating_types_work_in_hash_sets() {
    init();
    let mut set = HashSet::new();
    assert!(set.insert(Account::new("001", 10, &["ana", "bia"])));
    assert!(!set.insert(Account::new("001", 10, &["ana", "bia"])));
    assert!(set.insert(Account::new("001", 10, &["bia", "ana"])));
    assert!(set.insert(Account::new("002", 10, &["ana", "bia"])));
    assert_eq!(set.len(), 3);
}

#[test]
fn null_targets_are_rejected() {
    let err = EqualityStrategy::<P>::try_field_based(None).unwrap_err();
    assert!(matches!(err, EqualityError::InvalidArgument(_)));
}

#[test]
fn builder_matches_manual_folding() {
    let built = HashCodeBuilder::hash(&1i32)
        .and("a")
        .and(&[1i32, 2])
        .code();

    let mut array = MULTI_VALUE;
    array = hash(array, &1i32);
    array = hash(array, &2i32);

    let mut seed = hash(SINGLE_VALUE, &MULTI_VALUE);
    seed = hash(seed, &1i32);
    seed = hash(seed, &"a".hash_code());
    seed = hash(seed, &array);

    assert_eq!(built, seed);
}

fn small_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        "[a-c]{0,3}".prop_map(Value::from),
        prop::collection::vec(any::<i8>(), 0..4).prop_map(Value::from),
        Just(Value::Null),
    ]
}

struct Dynamic(Vec<Value>);

impl ValueSupplier for Dynamic {
    fn values(&self) -> Vec<Value> {
        self.0.clone()
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: equal targets hash equally under value and cached strategies.
    #[test]
    fn equal_implies_equal_hash(values in prop::collection::vec(small_value(), 0..6)) {
        let a = Arc::new(Dynamic(values.clone()));
        let b = Dynamic(values);

        let plain = EqualityStrategy::value_based(a.clone());
        prop_assert_eq!(plain.equals(&b), Ok(true));
        prop_assert_eq!(plain.hash_code(), plain.hash_of(&b));

        let cached = EqualityStrategy::value_based(a).cached();
        prop_assert_eq!(cached.equals(&b), Ok(true));
        prop_assert_eq!(cached.hash_code(), plain.hash_of(&b));
    }

    /// Property: field-based strategies agree on equal points.
    #[test]
    fn field_based_points(x in any::<i32>(), y in any::<i32>(), dx in 1i32..100) {
        let strategy = EqualityStrategy::field_based(Arc::new(P { x, y }));
        prop_assert_eq!(strategy.equals(&P { x, y }), Ok(true));
        prop_assert_eq!(strategy.hash_code(), strategy.hash_of(&P { x, y }));
        prop_assert_eq!(strategy.equals(&P { x: x.wrapping_add(dx), y }), Ok(false));
    }
}
