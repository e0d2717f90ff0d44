//! Partition routing-key composition.
//!
//! The routing key is the byte sequence the cluster's partitioner hashes to
//! pick the replicas owning a request. A single-column key is the encoded
//! column value itself. A composite key frames every component as:
//!
//! ```text
//! ├── Length (2 bytes, big-endian)
//! ├── Component bytes
//! └── Terminator (0x00)
//! ```
//!
//! A wrong key does not fail, it only routes to the wrong node, so every
//! component that cannot be encoded aborts the composition instead. A single
//! null component leaves the statement without a key.

use alloc::vec::Vec;

use crate::codec::encode;
use crate::encoding::frame::{fragment_len, write_fragment};
use crate::errors::Error;
use crate::types::TypeHint;
use crate::value::Value;

/// A routing key as held by the statement options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingKey {
    /// Final key bytes, handed to the partitioner as-is.
    Single(Vec<u8>),
    /// Precomputed components still to be framed into a composite key.
    Fragments(Vec<Vec<u8>>),
}

/// The routing-related part of the options a statement is executed with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Type hints by parameter position; `None` means the type is inferred.
    pub hints: Vec<Option<TypeHint>>,
    /// A routing key supplied by the caller or computed by [`compose_routing_key`].
    pub routing_key: Option<RoutingKey>,
    /// Positions of the parameters forming the partition key, in key order.
    pub routing_indexes: Option<Vec<usize>>,
}

impl QueryOptions {
    /// Creates options with no hints, key or routing indexes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the type hints by parameter position.
    #[must_use]
    pub fn hints<I, H>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = Option<H>>,
        H: Into<TypeHint>,
    {
        self.hints = hints.into_iter().map(|hint| hint.map(Into::into)).collect();
        self
    }

    /// Sets the positions of the partition key parameters.
    #[must_use]
    pub fn routing_indexes(mut self, indexes: impl IntoIterator<Item = usize>) -> Self {
        self.routing_indexes = Some(indexes.into_iter().collect());
        self
    }

    /// Sets a precomputed routing key.
    #[must_use]
    pub fn routing_key(mut self, key: RoutingKey) -> Self {
        self.routing_key = Some(key);
        self
    }

    /// Returns the hint for a parameter position, if one was given.
    #[must_use]
    pub fn hint(&self, index: usize) -> Option<&TypeHint> {
        self.hints.get(index).and_then(Option::as_ref)
    }

    /// Returns the final routing key bytes, if the key has been composed.
    #[must_use]
    pub fn routing_key_bytes(&self) -> Option<&[u8]> {
        match &self.routing_key {
            Some(RoutingKey::Single(bytes)) => Some(bytes),
            _ => None,
        }
    }
}

/// Frames components into a composite key.
///
/// A single component is returned unframed and an empty list yields `None`.
///
/// # Errors
///
/// * `TooLarge` - If a component does not fit a 2-byte length prefix.
///
/// # Example
///
/// ```
/// use cql_value_codec::frame_composite_key;
///
/// let key = frame_composite_key(&[vec![0x01u8], vec![0x02]]).unwrap();
/// assert_eq!(key, Some(vec![0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x02, 0x00]));
/// ```
pub fn frame_composite_key<F: AsRef<[u8]>>(fragments: &[F]) -> Result<Option<Vec<u8>>, Error> {
    match fragments {
        [] => Ok(None),
        [single] => Ok(Some(single.as_ref().to_vec())),
        many => {
            let len = many.iter().map(|f| fragment_len(f.as_ref())).sum();
            let mut out = Vec::with_capacity(len);
            for fragment in many {
                write_fragment(&mut out, fragment.as_ref())?;
            }
            Ok(Some(out))
        }
    }
}

/// Computes the routing key for a statement without touching its options.
///
/// * A precomputed single key is returned as-is.
/// * Precomputed fragments are framed by [`frame_composite_key`].
/// * Otherwise, when routing indexes and parameters are present, each indexed
///   parameter is encoded with its hint (or inferred type). A single component
///   is the key itself, so a null or missing parameter yields no key. Several
///   components are framed. Without routing indexes or parameters there is no key.
///
/// # Errors
///
/// * `RoutingIndexOutOfBounds` - If a composite key index points past the parameters.
/// * `NullRoutingComponent` - If a composite key parameter encodes to null.
/// * Any encoding error of an indexed parameter.
pub fn compute_routing_key(
    params: &[Value],
    options: &QueryOptions,
) -> Result<Option<Vec<u8>>, Error> {
    match &options.routing_key {
        Some(RoutingKey::Single(bytes)) => return Ok(Some(bytes.clone())),
        Some(RoutingKey::Fragments(fragments)) => {
            tracing::debug!(fragments = fragments.len(), "framing precomputed routing key");
            return frame_composite_key(fragments);
        }
        None => {}
    }
    let Some(indexes) = &options.routing_indexes else {
        return Ok(None);
    };
    if params.is_empty() {
        return Ok(None);
    }

    let key = match indexes.as_slice() {
        [] => None,
        [index] => encode_component(params, options, *index)?,
        many => {
            let fragments = collect_fragments(params, options, many)?;
            frame_composite_key(&fragments)?
        }
    };
    tracing::debug!(
        components = indexes.len(),
        len = key.as_ref().map_or(0, Vec::len),
        "computed routing key"
    );
    Ok(key)
}

/// Encodes the parameter at `index`; a missing parameter encodes like a null one.
fn encode_component(
    params: &[Value],
    options: &QueryOptions,
    index: usize,
) -> Result<Option<Vec<u8>>, Error> {
    match params.get(index) {
        Some(param) => encode(param, options.hint(index)),
        None => Ok(None),
    }
}

/// Encodes each indexed parameter into one composite key component.
fn collect_fragments(
    params: &[Value],
    options: &QueryOptions,
    indexes: &[usize],
) -> Result<Vec<Vec<u8>>, Error> {
    indexes
        .iter()
        .map(|&index| {
            if index >= params.len() {
                return Err(Error::RoutingIndexOutOfBounds {
                    index,
                    len: params.len(),
                });
            }
            encode_component(params, options, index)?.ok_or(Error::NullRoutingComponent(index))
        })
        .collect()
}

/// Computes the routing key and stores it in `options.routing_key`.
///
/// On success the options hold [`RoutingKey::Single`] whenever a key could be
/// derived, and are left unchanged otherwise. On failure `options.routing_key`
/// must not be used.
///
/// # Errors
///
/// Same as [`compute_routing_key`].
///
/// # Example
///
/// ```
/// use cql_value_codec::{QueryOptions, Value, compose_routing_key};
///
/// let params = [Value::from(1), Value::from("yeah"), Value::from(2)];
/// let mut options = QueryOptions::new()
///     .hints([Some("int"), Some("string"), Some("int")])
///     .routing_indexes([0, 2]);
/// compose_routing_key(&params, &mut options).unwrap();
/// assert_eq!(
///     options.routing_key_bytes(),
///     Some(&[0, 4, 0, 0, 0, 1, 0, 0, 4, 0, 0, 0, 2, 0][..])
/// );
/// ```
pub fn compose_routing_key(params: &[Value], options: &mut QueryOptions) -> Result<(), Error> {
    if let Some(key) = compute_routing_key(params, options)? {
        options.routing_key = Some(RoutingKey::Single(key));
    } else if matches!(options.routing_key, Some(RoutingKey::Fragments(_))) {
        options.routing_key = None;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_frame_fragments() {
        let key = frame_composite_key(&[vec![0x01u8], vec![0x02], vec![0x03, 0x03]]).unwrap();
        assert_eq!(
            key,
            Some(vec![
                0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x02, 0x03, 0x03, 0x00
            ])
        );
        assert_eq!(frame_composite_key::<Vec<u8>>(&[]).unwrap(), None);
        assert_eq!(frame_composite_key(&[vec![9u8, 9]]).unwrap(), Some(vec![9, 9]));
    }

    #[test]
    fn test_precomputed_single_key_is_kept() {
        let mut options = QueryOptions::new()
            .routing_key(RoutingKey::Single(vec![7]))
            .routing_indexes([0]);
        compose_routing_key(&[Value::from(1)], &mut options).unwrap();
        assert_eq!(options.routing_key_bytes(), Some(&[7][..]));
    }

    #[test]
    fn test_no_indexes_or_params_is_a_no_op() {
        let mut options = QueryOptions::new();
        compose_routing_key(&[Value::from(1)], &mut options).unwrap();
        assert_eq!(options.routing_key, None);

        let mut options = QueryOptions::new().routing_indexes([0]);
        compose_routing_key(&[], &mut options).unwrap();
        assert_eq!(options.routing_key, None);
    }

    #[test]
    fn test_single_component_is_unframed() {
        let options = QueryOptions::new()
            .hints([Some("int")])
            .routing_indexes([0]);
        assert_eq!(
            compute_routing_key(&[Value::from(5)], &options).unwrap(),
            Some(vec![0, 0, 0, 5])
        );
    }

    #[test]
    fn test_single_null_or_missing_component_yields_no_key() {
        let options = QueryOptions::new()
            .hints([Some("int")])
            .routing_indexes([0]);
        assert_eq!(compute_routing_key(&[Value::Null], &options), Ok(None));

        let options = QueryOptions::new()
            .hints([Some("int")])
            .routing_indexes([1]);
        assert_eq!(compute_routing_key(&[Value::from(1)], &options), Ok(None));

        let mut options = QueryOptions::new().routing_indexes([0]);
        compose_routing_key(&[Value::Null], &mut options).unwrap();
        assert_eq!(options.routing_key, None);
    }

    #[test]
    fn test_component_errors() {
        let options = QueryOptions::new().routing_indexes([0, 3]);
        assert_eq!(
            compute_routing_key(&[Value::from(1)], &options),
            Err(Error::RoutingIndexOutOfBounds { index: 3, len: 1 })
        );

        let options = QueryOptions::new().routing_indexes([0, 1]);
        assert_eq!(
            compute_routing_key(&[Value::from(1), Value::Null], &options),
            Err(Error::NullRoutingComponent(1))
        );

        let options = QueryOptions::new()
            .hints([Some("int")])
            .routing_indexes([0]);
        assert!(matches!(
            compute_routing_key(&[Value::from("hello")], &options),
            Err(Error::TypeMismatch { .. })
        ));
    }
}
