// src/utilities/interleave.rs
//
// round-robin visiting order across groups of uneven length

use crate::config::InterleaveAlignment;

/// Returns `(group, index)` pairs visiting the i-th member of every group
/// before the (i+1)-th of any group. Exhausted groups are passed over.
///
/// With `End` alignment shorter groups join late, so every group finishes on
/// the last round.
pub fn interleave(lengths: &[usize], alignment: InterleaveAlignment) -> Vec<(usize, usize)> {
    let longest = lengths.iter().copied().max().unwrap_or(0);
    let mut order = Vec::with_capacity(lengths.iter().sum());

    for round in 0..longest {
        for (group, &len) in lengths.iter().enumerate() {
            let index = match alignment {
                InterleaveAlignment::Start => Some(round),
                InterleaveAlignment::End => round.checked_sub(longest - len),
            };
            if let Some(index) = index.filter(|&i| i < len) {
                order.push((group, index));
            }
        }
    }
    order
}
