//! Prefix completion over the command and flag tables.
//!
//! Completion is computed as a value and applied by the caller; nothing here
//! touches the terminal. Tokens are the single-space split of the whole line,
//! and the token under the cursor is identified by counting spaces left of
//! the edit position.

use crate::buffer::LineBuffer;
use crate::registry::Registry;

/// Outcome of one Tab press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing to do: precondition failed, unknown command, or no candidate.
    None,
    /// Exactly one candidate; `line` is the buffer with the token replaced.
    Single { line: String },
    /// Several candidates; `line` extends the token to their longest common
    /// prefix, and `candidates` is the full set to list below the prompt.
    Partial {
        line: String,
        candidates: Vec<String>,
    },
}

/// Computes the completion action for the current buffer.
///
/// Completion only fires at a token boundary: the cursor must sit at
/// end-of-line or immediately left of a space. Field 0 completes against
/// every registered alias; later fields complete against the flags of the
/// command named by token 0 (no-op when token 0 does not resolve).
pub fn complete(buffer: &LineBuffer, registry: &Registry) -> Completion {
    let text = buffer.text();
    let edit = buffer.edit_pos();
    if buffer.offset_from_end() > 0 && text.as_bytes()[edit] != b' ' {
        return Completion::None;
    }

    let mut tokens: Vec<&str> = text.split(' ').collect();
    let field = text.as_bytes()[..edit].iter().filter(|&&b| b == b' ').count();
    let current = tokens[field];

    let candidates: Vec<String> = if field == 0 {
        registry
            .all_aliases()
            .filter(|alias| alias.starts_with(current))
            .map(str::to_string)
            .collect()
    } else {
        let Some(canonical) = registry.resolve(tokens[0]) else {
            return Completion::None;
        };
        registry
            .flags_for(canonical)
            .filter(|flag| flag.starts_with(current))
            .map(str::to_string)
            .collect()
    };

    match candidates.len() {
        0 => Completion::None,
        1 => {
            tokens[field] = &candidates[0];
            Completion::Single {
                line: tokens.join(" "),
            }
        }
        _ => {
            let prefix = common_prefix(&candidates, current.len());
            tokens[field] = &prefix;
            Completion::Partial {
                line: tokens.join(" "),
                candidates,
            }
        }
    }
}

/// Longest prefix shared by all candidates, at least `floor` bytes long.
/// Every candidate is known to extend the current token, so `floor` is safe.
fn common_prefix(candidates: &[String], floor: usize) -> String {
    let first = &candidates[0];
    let mut len = floor;
    while candidates
        .iter()
        .all(|c| len < c.len() && c.as_bytes()[len] == first.as_bytes()[len])
    {
        len += 1;
    }
    first[..len].to_string()
}
