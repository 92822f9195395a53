//! Deep merge of JSON values.

use serde_json::Value;

/// Merge `source` onto `base`, recursing through objects.
///
/// `source` wins on key conflicts at every nesting level. Arrays are treated
/// as atomic values and replaced wholesale, never merged element-wise.
pub fn deep_merge(base: &mut Value, source: Value) {
    match (base, source) {
        (Value::Object(base_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match base_map.get_mut(&key) {
                    Some(base_value) => deep_merge(base_value, source_value),
                    None => {
                        base_map.insert(key, source_value);
                    }
                }
            }
        }
        (base_slot, source_value) => {
            *base_slot = source_value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_wins_on_conflict() {
        let mut base = json!({"a": 1, "b": 2});
        deep_merge(&mut base, json!({"b": 3}));
        assert_eq!(base, json!({"a": 1, "b": 3}));
    }

    #[test]
    fn test_nested_objects_merge() {
        let mut base = json!({"company": {"name": "Default", "phone": "555"}});
        deep_merge(&mut base, json!({"company": {"name": "Acme"}}));
        assert_eq!(
            base,
            json!({"company": {"name": "Acme", "phone": "555"}})
        );
    }

    #[test]
    fn test_new_default_keys_survive() {
        // Simulates loading an old saved config onto newer defaults: keys the
        // saved file never knew about remain present.
        let mut base = json!({"settings": {"callTimeout": 300, "newFlag": true}});
        deep_merge(&mut base, json!({"settings": {"callTimeout": 600}}));
        assert_eq!(
            base,
            json!({"settings": {"callTimeout": 600, "newFlag": true}})
        );
    }

    #[test]
    fn test_arrays_replace_atomically() {
        let mut base = json!({"services": ["a", "b", "c"]});
        deep_merge(&mut base, json!({"services": ["x"]}));
        assert_eq!(base, json!({"services": ["x"]}));
    }

    #[test]
    fn test_type_mismatch_takes_source() {
        let mut base = json!({"pricing": {"quarterly": "$129"}});
        deep_merge(&mut base, json!({"pricing": "call us"}));
        assert_eq!(base, json!({"pricing": "call us"}));
    }
}
