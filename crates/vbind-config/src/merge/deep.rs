use super::{ConfigLayer, FieldSources};

/// Deep-merge `overlay` into `base`, recording which layer set each leaf.
///
/// Tables merge per key; scalars and arrays from the overlay replace the
/// base value. `prefix` is the dotted path of `base` (empty at the root).
pub fn deep_merge_tracking(
    base: &mut toml::Value,
    overlay: &toml::Value,
    prefix: &str,
    layer: &ConfigLayer,
    sources: &mut FieldSources,
) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let path = join_path(prefix, key);
                match base_table.get_mut(key) {
                    Some(base_val) if overlay_val.is_table() => {
                        deep_merge_tracking(base_val, overlay_val, &path, layer, sources);
                    },
                    Some(base_val) => {
                        *base_val = overlay_val.clone();
                        sources.insert(path, layer.clone());
                    },
                    None => {
                        base_table.insert(key.clone(), overlay_val.clone());
                        record_leaves(overlay_val, &path, layer, sources);
                    },
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
            record_leaves(overlay, prefix, layer, sources);
        },
    }
}

/// Record every leaf under `val` as set by `layer`.
pub(crate) fn record_leaves(
    val: &toml::Value,
    prefix: &str,
    layer: &ConfigLayer,
    sources: &mut FieldSources,
) {
    if let toml::Value::Table(table) = val {
        for (key, child) in table {
            record_leaves(child, &join_path(prefix, key), layer, sources);
        }
    } else {
        sources.insert(prefix.to_owned(), layer.clone());
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn overlay_replaces_leaves_and_keeps_the_rest() {
        let mut base = parse(
            r#"
            [search]
            hosts = ["http://127.0.0.1:9200"]
            version_key = "major"
            "#,
        );
        let overlay = parse(
            r#"
            [search]
            hosts = ["http://es-1:9200", "http://es-2:9200"]
            "#,
        );
        let mut sources = FieldSources::new();

        deep_merge_tracking(&mut base, &overlay, "", &ConfigLayer::User, &mut sources);

        assert_eq!(base["search"]["hosts"].as_array().unwrap().len(), 2);
        assert_eq!(base["search"]["version_key"].as_str(), Some("major"));
        assert_eq!(sources.get("search.hosts"), Some(&ConfigLayer::User));
        assert_eq!(sources.get("search.version_key"), None);
    }

    #[test]
    fn new_tables_record_every_leaf() {
        let mut base = parse("[logging]\nlevel = \"info\"");
        let overlay = parse("[probe]\ntimeout_secs = 2\nmax_attempts = 5");
        let mut sources = FieldSources::new();

        deep_merge_tracking(&mut base, &overlay, "", &ConfigLayer::System, &mut sources);

        assert_eq!(base["probe"]["max_attempts"].as_integer(), Some(5));
        assert_eq!(sources.get("probe.timeout_secs"), Some(&ConfigLayer::System));
        assert_eq!(sources.get("probe.max_attempts"), Some(&ConfigLayer::System));
        assert_eq!(sources.get("logging.level"), None);
    }
}
