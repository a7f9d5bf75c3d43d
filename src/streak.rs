/// A maximal run of equal values; `start..end` is 0-based half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    pub start: usize,
    pub end: usize,
    pub len: usize,
    pub value: bool,
}

pub fn streaks(mask: &[bool]) -> Vec<Streak> {
    let mut out = Vec::new();
    if mask.is_empty() {
        return out;
    }
    let mut start = 0;
    for i in 1..mask.len() {
        if mask[i] != mask[i - 1] {
            out.push(Streak {
                start,
                end: i,
                len: i - start,
                value: mask[start],
            });
            start = i;
        }
    }
    out.push(Streak {
        start,
        end: mask.len(),
        len: mask.len() - start,
        value: mask[start],
    });
    out
}

/// `true` streaks of a mask, reported as 1-based inclusive positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bouts {
    pub count: usize,
    pub starts: Vec<usize>,
    pub ends: Vec<usize>,
    pub lengths: Vec<usize>,
}

pub fn find_bouts(mask: &[bool]) -> Bouts {
    let mut bouts = Bouts::default();
    for s in streaks(mask) {
        if s.value {
            bouts.count += 1;
            bouts.starts.push(s.start + 1);
            bouts.ends.push(s.end);
            bouts.lengths.push(s.len);
        }
    }
    bouts
}
