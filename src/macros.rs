#[macro_export]
macro_rules! value {
    // Handle empty sequence
    ([]) => {
        $crate::Value::Seq(vec![])
    };

    // Handle non-empty sequence
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Seq(vec![$($crate::value!($elem)),*])
    };

    // Handle empty mapping
    ({}) => {
        $crate::Value::Map(::std::collections::BTreeMap::new())
    };

    // Handle non-empty mapping
    ({ $($key:literal => $val:tt),* $(,)? }) => {{
        let mut entries = ::std::collections::BTreeMap::new();
        $(
            entries.insert($crate::Value::from($key), $crate::value!($val));
        )*
        $crate::Value::Map(entries)
    }};

    // Fallback: anything convertible into a Value
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Scalar, Value};

    #[test]
    fn value_macro_scalars() {
        assert_eq!(value!(42), Value::Scalar(Scalar::Int(42)));
        assert_eq!(value!(2.5), Value::Scalar(Scalar::Float(2.5)));
        assert_eq!(value!(true), Value::Scalar(Scalar::Bool(true)));
        assert_eq!(value!("hello"), Value::Scalar(Scalar::Text("hello".into())));
    }

    #[test]
    fn value_macro_sequences() {
        assert_eq!(value!([]), Value::Seq(vec![]));

        let seq = value!([1, 2, 3]);
        match seq {
            Value::Seq(elems) => {
                assert_eq!(elems.len(), 3);
                assert_eq!(elems[0], Value::from(1));
            }
            _ => panic!("expected a sequence"),
        }
    }

    #[test]
    fn value_macro_mappings() {
        let map = value!({
            "name" => "alice",
            "age" => 30
        });

        match map {
            Value::Map(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(
                    entries.get(&Value::from("name")),
                    Some(&Value::from("alice"))
                );
            }
            _ => panic!("expected a mapping"),
        }
    }

    #[test]
    fn value_macro_nests() {
        let v = value!([[1, 2], [3, 4]]);
        match v {
            Value::Seq(rows) => assert_eq!(rows.len(), 2),
            _ => panic!("expected a sequence"),
        }
    }
}
