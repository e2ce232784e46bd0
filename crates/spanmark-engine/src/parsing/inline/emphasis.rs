use crate::ast::InlineNode;

use super::input::InlineInput;
use super::scan::{Atom, Delim, finalize};

/// Second inline pass: resolves emphasis delimiter runs.
///
/// Walks potential closers left to right, pairing each with the nearest
/// compatible opener. Double runs bind as strong before single runs bind as
/// emphasis, so `**` wins over `*` when both could close. Leftover runs are
/// turned into literal text by [`finalize`].
pub(super) fn process(atoms: &mut Vec<Atom>, input: &InlineInput) {
    let mut closer = 0usize;
    while closer < atoms.len() {
        let c = match &atoms[closer] {
            Atom::Delim(d) if d.can_close && d.count > 0 => *d,
            _ => {
                closer += 1;
                continue;
            }
        };

        let mut opener = None;
        let mut k = closer;
        while k > 0 {
            k -= 1;
            if let Atom::Delim(o) = &atoms[k]
                && o.ch == c.ch
                && o.can_open
                && o.count > 0
                && compatible(o, &c)
            {
                opener = Some(k);
                break;
            }
        }
        let Some(oi) = opener else {
            closer += 1;
            continue;
        };

        let o = match &atoms[oi] {
            Atom::Delim(d) => *d,
            _ => unreachable!("opener index points at a delimiter"),
        };
        let used = if o.count >= 2 && c.count >= 2 { 2 } else { 1 };

        // Everything between the pair becomes the new node's children;
        // unpaired delimiters in there have lost their chance.
        let inner: Vec<Atom> = atoms.drain(oi + 1..closer).collect();
        let children = finalize(inner, input);
        let span = input.abs_span(o.hi - used, c.lo + used);
        let node = match (c.ch, used) {
            (b'~', _) => InlineNode::Strikethrough { children, span },
            (_, 2) => InlineNode::Strong { children, span },
            _ => InlineNode::Emphasis { children, span },
        };

        if let Atom::Delim(d) = &mut atoms[oi] {
            d.hi -= used;
            d.count -= used;
        }
        atoms.insert(oi + 1, Atom::Node(node));
        let mut closer_idx = oi + 2;
        let mut closer_spent = false;
        if let Atom::Delim(d) = &mut atoms[closer_idx] {
            d.lo += used;
            d.count -= used;
            closer_spent = d.count == 0;
        }
        if closer_spent {
            atoms.remove(closer_idx);
        }
        if o.count == used {
            atoms.remove(oi);
            closer_idx -= 1;
        }
        // Re-examine from the closer's position: it may still close, or the
        // next atom may be the following closer.
        closer = closer_idx;
    }
}

/// The multiple-of-3 rule: when one side of the pair could both open and
/// close, original run lengths summing to a multiple of three cannot pair
/// unless both are themselves multiples of three.
fn compatible(o: &Delim, c: &Delim) -> bool {
    if o.can_close || c.can_open {
        let sum = o.orig_count + c.orig_count;
        if sum % 3 == 0 && !(o.orig_count % 3 == 0 && c.orig_count % 3 == 0) {
            return false;
        }
    }
    true
}
