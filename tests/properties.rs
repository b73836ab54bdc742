use proptest::prelude::*;
use sqrttree::util::{FnSemigroup, Max, Sum};
use sqrttree::SqrtTree;

fn items_and_range() -> impl Strategy<Value = (Vec<i64>, usize, usize)> {
    prop::collection::vec(-1_000i64..1_000, 1..300).prop_flat_map(|items| {
        let n = items.len();
        (Just(items), 0..n, 0..n).prop_map(|(items, x, y)| (items, x.min(y), x.max(y)))
    })
}

proptest! {
    #[test]
    fn query_matches_fold((items, l, r) in items_and_range()) {
        let tree = SqrtTree::new(Sum::new(), items.clone()).unwrap();
        prop_assert_eq!(tree.query(l, r).unwrap(), items[l..=r].iter().sum::<i64>());
        prop_assert_eq!(tree.fold(l..=r).unwrap(), items[l..=r].iter().sum::<i64>());
    }

    #[test]
    fn point_query_is_element(items in prop::collection::vec(any::<i32>(), 1..200)) {
        let tree = SqrtTree::new(Max::new(), items.clone()).unwrap();
        for (x, v) in items.iter().enumerate() {
            prop_assert_eq!(tree.query(x, x).unwrap(), *v);
        }
    }

    #[test]
    fn update_then_point_query(
        (items, l, r) in items_and_range(),
        value in -1_000i64..1_000,
    ) {
        let mut tree = SqrtTree::new(Sum::new(), items.clone()).unwrap();
        let mut expected = items;
        tree.update(l, value).unwrap();
        expected[l] = value;
        prop_assert_eq!(tree.query(l, l).unwrap(), value);
        prop_assert_eq!(tree.query(l, r).unwrap(), expected[l..=r].iter().sum::<i64>());
        prop_assert_eq!(tree.fold(..).unwrap(), expected.iter().sum::<i64>());
    }

    #[test]
    fn concatenation_keeps_order(words in prop::collection::vec("[a-z]{0,3}", 1..80)) {
        let concat = FnSemigroup::new(|a: &String, b: &String| format!("{a}{b}"));
        let tree = SqrtTree::new(concat, words.clone()).unwrap();
        let n = words.len();
        for l in 0..n {
            prop_assert_eq!(tree.query(l, n - 1).unwrap(), words[l..].concat());
        }
    }

    #[test]
    fn out_of_bounds_is_rejected(items in prop::collection::vec(any::<u8>(), 1..50), extra in 0usize..10) {
        let n = items.len();
        let mut tree = SqrtTree::new(Max::new(), items.clone()).unwrap();
        prop_assert!(tree.query(0, n + extra).is_err());
        prop_assert!(tree.update(n + extra, 0).is_err());
        prop_assert_eq!(tree.as_ref(), items.as_slice());
    }
}
