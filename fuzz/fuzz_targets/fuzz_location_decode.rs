#![no_main]

use dockloc::persist::PersistedLocation;
use dockloc::{ExpandOptions, LocationProperty, MapRegistry, StandardRoots, collapse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(persisted) = PersistedLocation::from_json(text) else {
        return;
    };

    let catalog = StandardRoots::new().with_working_area("editors");
    let registry: MapRegistry<u8> = MapRegistry::new();
    let options = ExpandOptions::default();

    // Decoding may fail, but never panic; a successful fallback must be a
    // chain whose own property expands again.
    if let Ok(resolution) = persisted.restore(&catalog, &registry, &options)
        && let Some(location) = resolution.location()
    {
        let property: LocationProperty = collapse(location);
        assert!(
            dockloc::expand(&property, location.root()).is_ok(),
            "re-expanding a restored chain failed: {property:?}"
        );
    }

    let _ = serde_json::to_string(&persisted);
});
