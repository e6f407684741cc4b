//! quickcheck generators for property tests

use quickcheck::{Arbitrary, Gen};

use crate::value::{Object, Value};

/// A finite f64; the lexer has no spelling for NaN or infinities
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FiniteNumber(pub f64);

impl Arbitrary for FiniteNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }
        FiniteNumber(value)
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        fn scalar(g: &mut Gen) -> Value {
            match usize::arbitrary(g) % 4 {
                0 => Value::Null,
                1 => Value::Boolean(bool::arbitrary(g)),
                2 => Value::Number(FiniteNumber::arbitrary(g).0),
                _ => Value::String(String::arbitrary(g)),
            }
        }

        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            if depth == 0 {
                return scalar(g);
            }
            match usize::arbitrary(g) % 6 {
                4 => {
                    let len = usize::arbitrary(g) % 4;
                    Value::List((0..len).map(|_| gen_val(g, depth - 1)).collect())
                }
                5 => {
                    let len = usize::arbitrary(g) % 4;
                    let mut map = Object::new();
                    for _ in 0..len {
                        map.insert(String::arbitrary(g), gen_val(g, depth - 1));
                    }
                    Value::Object(map)
                }
                _ => scalar(g),
            }
        }

        let depth = usize::arbitrary(g) % 4;
        gen_val(g, depth)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Value>> {
        match self {
            Value::List(items) => Box::new(items.clone().into_iter()),
            Value::Object(map) => Box::new(map.clone().into_values()),
            Value::String(s) => Box::new(s.shrink().map(Value::String)),
            Value::Number(n) => Box::new(
                n.shrink()
                    .filter(|n| n.is_finite())
                    .map(Value::Number),
            ),
            Value::Boolean(_) | Value::Null => quickcheck::empty_shrinker(),
        }
    }
}
