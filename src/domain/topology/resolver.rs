use std::collections::HashMap;
use std::fmt;

use slotmap::SlotMap;

use crate::domain::topology::extractor::PendingLink;
use crate::domain::topology::link::{Link, LinkKey};
use crate::domain::topology::operation::{Operation, OperationAddress, OperationKey};
use crate::error::Error;

/// A declared connection reported back in a `LinkCardinalityError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictingConnection {
    pub producer: OperationAddress,
    pub message_name: String,
}

impl fmt::Display for ConflictingConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.producer, self.message_name)
    }
}

impl From<&PendingLink> for ConflictingConnection {
    fn from(pending: &PendingLink) -> Self {
        ConflictingConnection { producer: pending.producer_address.clone(), message_name: pending.message_name.clone() }
    }
}

#[derive(Debug, Default)]
pub struct ResolvedLinks {
    pub links: SlotMap<LinkKey, Link>,

    /// Keys to `links` in creation order.
    pub order: Vec<LinkKey>,

    /// Declared connections whose target names no extracted operation.
    pub unmatched: Vec<PendingLink>,
}

/// Joins the pending links against the operations and creates one `Link`
/// per operation that expects an upstream.
///
/// Every operation must be addressed by exactly as many declarations as it
/// expects incoming links (0 for `Empty` input, 1 otherwise). Link keys are
/// appended to the producer's `outgoing` and the consumer's `incoming`.
pub fn resolve_links(
    operations: &mut SlotMap<OperationKey, Operation>,
    order: &[OperationKey],
    pending: &[PendingLink],
) -> Result<ResolvedLinks, Error> {
    let mut resolved = ResolvedLinks::default();

    // target address -> positions in `pending`, declaration order kept
    let mut by_target: HashMap<&OperationAddress, Vec<usize>> = HashMap::new();
    for (position, pending_link) in pending.iter().enumerate() {
        by_target.entry(&pending_link.target).or_default().push(position);
    }

    let mut consumed = vec![false; pending.len()];

    for &consumer_key in order {
        let consumer = &operations[consumer_key];
        let address = consumer.address();
        let expected = consumer.expected_incoming();
        let input_message = consumer.input.name.clone();

        let matches: &[usize] = by_target.get(&address).map(Vec::as_slice).unwrap_or(&[]);

        if matches.len() != expected {
            return Err(Error::LinkCardinalityError {
                container_name: address.container_name,
                operation: address.operation,
                input_message,
                observed: matches.len(),
                expected,
                conflicting: matches.iter().map(|&i| ConflictingConnection::from(&pending[i])).collect(),
            });
        }

        for &position in matches {
            consumed[position] = true;
            let pending_link = &pending[position];

            if pending_link.message_name != input_message {
                log::debug!(
                    "Link {} -> {} carries '{}' into an input declared as '{}'.",
                    pending_link.producer_address,
                    pending_link.target,
                    pending_link.message_name,
                    input_message
                );
            }

            let link = Link {
                producer: pending_link.producer,
                consumer: consumer_key,
                message_name: pending_link.message_name.clone(),
            };
            let link_key = resolved.links.insert(link);
            resolved.order.push(link_key);

            operations[pending_link.producer].outgoing.push(link_key);
            operations[consumer_key].incoming.push(link_key);
        }
    }

    for (position, pending_link) in pending.iter().enumerate() {
        if !consumed[position] {
            tracing::warn!(
                producer = %pending_link.producer_address,
                target = %pending_link.target,
                "Declared connection targets no operation of the blueprint; it stays unlinked"
            );
            resolved.unmatched.push(pending_link.clone());
        }
    }

    Ok(resolved)
}
