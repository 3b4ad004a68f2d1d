use crate::Occurrence;

/// Where `insert_last_occurrence` placed the element, and the midpoints it probed on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertTrace {
    pub position: usize,
    pub probes: Vec<usize>,
}

/// Binary search over `sorted` (descending by frequency) for the slot of an
/// occurrence with `frequency`.
///
/// Equal frequencies keep searching to the right, so the new occurrence lands
/// after every occurrence it ties with.
pub fn find_insert_position(sorted: &[Occurrence], frequency: u32) -> InsertTrace {
    let mut probes = Vec::new();
    // inclusive bounds; hi goes to -1 when the target beats position 0
    let mut lo: isize = 0;
    let mut hi: isize = sorted.len() as isize - 1;
    while lo <= hi {
        let mid = (lo + hi) / 2;
        probes.push(mid as usize);
        if frequency > sorted[mid as usize].frequency {
            hi = mid - 1;
        } else {
            lo = mid + 1;
        }
    }
    InsertTrace { position: lo as usize, probes }
}

/// Move the last element of `occs` into its place in the descending order of
/// the elements before it.
///
/// `occs[..n - 1]` must already be sorted. Returns `None` when there is at
/// most one element and nothing can move.
pub fn insert_last_occurrence(occs: &mut Vec<Occurrence>) -> Option<InsertTrace> {
    if occs.len() <= 1 { return None; }
    let last = occs.pop()?;
    let trace = find_insert_position(occs, last.frequency);
    occs.insert(trace.position, last);
    Some(trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occs(freqs: &[u32]) -> Vec<Occurrence> {
        freqs
            .iter()
            .enumerate()
            .map(|(i, &f)| Occurrence::new(format!("doc{i}"), f))
            .collect()
    }

    fn freqs(occs: &[Occurrence]) -> Vec<u32> {
        occs.iter().map(|o| o.frequency).collect()
    }

    #[test]
    fn inserts_between_larger_and_smaller() {
        let mut list = occs(&[5, 3, 3, 1, 4]);
        let trace = insert_last_occurrence(&mut list).unwrap();
        assert_eq!(freqs(&list), vec![5, 4, 3, 3, 1]);
        assert_eq!(trace.position, 1);
        assert_eq!(trace.probes, vec![1, 0]);
    }

    #[test]
    fn tie_lands_after_equal_frequencies() {
        let mut list = occs(&[5, 3, 1, 3]);
        let trace = insert_last_occurrence(&mut list).unwrap();
        assert_eq!(freqs(&list), vec![5, 3, 3, 1]);
        assert_eq!(trace.position, 2);
        assert_eq!(trace.probes, vec![1, 2]);
        assert_eq!(list[1].document, "doc1");
        assert_eq!(list[2].document, "doc3");
    }

    #[test]
    fn tie_skips_whole_run_of_equals() {
        let mut list = occs(&[4, 2, 2, 2, 2, 1, 2]);
        let trace = insert_last_occurrence(&mut list).unwrap();
        assert_eq!(trace.position, 5);
        assert_eq!(trace.probes, vec![2, 4, 5]);
        assert_eq!(list[5].document, "doc6");
        assert_eq!(freqs(&list), vec![4, 2, 2, 2, 2, 2, 1]);
    }

    #[test]
    fn new_maximum_goes_first() {
        let mut list = occs(&[3, 2, 9]);
        let trace = insert_last_occurrence(&mut list).unwrap();
        assert_eq!(trace.position, 0);
        assert_eq!(trace.probes, vec![0]);
        assert_eq!(freqs(&list), vec![9, 3, 2]);
    }

    #[test]
    fn new_minimum_stays_last() {
        let mut list = occs(&[3, 2, 1]);
        let trace = insert_last_occurrence(&mut list).unwrap();
        assert_eq!(trace.position, 2);
        assert_eq!(trace.probes, vec![0, 1]);
        assert_eq!(freqs(&list), vec![3, 2, 1]);
    }

    #[test]
    fn probes_follow_inclusive_midpoints() {
        let sorted = occs(&[9, 7, 5, 3]);
        let trace = find_insert_position(&sorted, 2);
        assert_eq!(trace.probes, vec![1, 2, 3]);
        assert_eq!(trace.position, 4);

        let sorted = occs(&[9, 7]);
        let trace = find_insert_position(&sorted, 8);
        assert_eq!(trace.probes, vec![0, 1]);
        assert_eq!(trace.position, 1);

        let sorted = occs(&[5, 3, 3, 1]);
        assert_eq!(find_insert_position(&sorted, 4).probes, vec![1, 0]);
        assert!(find_insert_position(&[], 4).probes.is_empty());
    }

    #[test]
    fn single_element_has_nothing_to_move() {
        let mut list = occs(&[7]);
        assert_eq!(insert_last_occurrence(&mut list), None);
        assert_eq!(freqs(&list), vec![7]);

        let mut empty = Vec::new();
        assert_eq!(insert_last_occurrence(&mut empty), None);
    }
}
