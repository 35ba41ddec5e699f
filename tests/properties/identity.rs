//! Property tests for resource identity keys.

use proptest::prelude::*;

use stackctl::ResourceKey;

fn service_alias() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![
        Just(("jobs", "job")),
        Just(("workspace", "workspace")),
        Just(("filesystem", "dbfs")),
    ]
}

proptest! {
    /// PROPERTY: aliases of the same service produce the same key.
    #[test]
    fn property_aliases_share_identity(
        id in "[a-z0-9_-]{1,16}",
        (canonical, alias) in service_alias(),
    ) {
        prop_assert_eq!(ResourceKey::new(id.clone(), canonical), ResourceKey::new(id, alias));
    }

    /// PROPERTY: the id always survives key construction verbatim.
    #[test]
    fn property_id_is_preserved(id in ".{0,24}", service in "[a-zA-Z]{1,10}") {
        let key = ResourceKey::new(id.clone(), &service);
        prop_assert_eq!(key.id(), id.as_str());
    }

    /// PROPERTY: different ids never collide.
    #[test]
    fn property_distinct_ids_are_distinct_keys(
        a in "[a-z]{1,8}",
        b in "[a-z]{1,8}",
        service in "[a-z]{1,8}",
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(ResourceKey::new(a, &service), ResourceKey::new(b, &service));
    }
}
