//! Reclassification of raw nested values into typed containers.
//!
//! Rules are applied in a fixed order, first match wins:
//! 1. `Object` → `Map` (recursive scan)
//! 2. `Floats`, all whole → `Set<i64>`
//! 3. `Floats` → `Set<f64>`
//! 4. `Strings` → `Set<String>`
//! 5. `Blobs` → `Set<Vec<u8>>`
//! 6. `Seq` → `List` (recursive scan)
//! 7. anything else is left as-is
//!
//! Rule 2 always wins over rule 3: a float slice with no fractional parts
//! becomes an integer set, with no way to ask for a float set instead.

use crate::error::Result;
use crate::list::List;
use crate::map::Map;
use crate::scan::Scan;
use crate::set::{Set, SetElement};
use crate::value::{Object, Value};

/// Resolve every element of a list in place. Stops at the first error; the
/// caller is responsible for resetting the container.
pub(crate) fn resolve_in_list(items: &mut [Value]) -> Result<()> {
    for item in items.iter_mut() {
        let raw = std::mem::take(item);
        *item = resolve_value(raw)?;
    }
    Ok(())
}

/// Map counterpart of [`resolve_in_list`].
pub(crate) fn resolve_in_map(entries: &mut Object) -> Result<()> {
    for (key, item) in entries.iter_mut() {
        let raw = std::mem::take(item);
        *item = resolve_value(raw).inspect_err(|e| {
            tracing::trace!(key = %key, error = %e, "failed to resolve map entry");
        })?;
    }
    Ok(())
}

/// Reclassify one raw value into the most specific container kind.
pub fn resolve_value(value: Value) -> Result<Value> {
    if let Value::Object(_) = value {
        let mut map = Map::new();
        map.scan(value)?;
        return Ok(Value::Map(map));
    }
    if i64::is_compatible(&value) {
        return into_set::<i64>(value);
    }
    if f64::is_compatible(&value) {
        return into_set::<f64>(value);
    }
    if String::is_compatible(&value) {
        return into_set::<String>(value);
    }
    if Vec::<u8>::is_compatible(&value) {
        return into_set::<Vec<u8>>(value);
    }
    if let Value::Seq(_) = value {
        let mut list = List::new();
        list.scan(value)?;
        return Ok(Value::List(list));
    }
    Ok(value)
}

fn into_set<T: SetElement>(value: Value) -> Result<Value> {
    let mut set = Set::<T>::new();
    set.scan(value)?;
    tracing::trace!(kind = T::DATA_TYPE, len = set.len(), "resolved nested set");
    Ok(Value::from(set))
}
