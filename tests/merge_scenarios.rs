use zip_range_reduce::{BoundedRange, Domain, MembershipTracker};

fn reduce_lines(lines: &[&str]) -> Vec<(u32, u32)> {
    let mut tracker = MembershipTracker::<u32>::default();
    for line in lines {
        let range = tracker.parse_range(line).unwrap();
        tracker.mark(&range);
    }
    tracker.reduce(true).iter()
        .map(|range| (range.lower(), range.upper()))
        .collect()
}

#[test]
fn overlapping_ranges_merge() {
    assert_eq!(reduce_lines(&["10000,10005", "10002,10009"]),
        vec![(10000, 10009)]);
}
#[test]
fn overlapping_ranges_merge_out_of_order() {
    assert_eq!(reduce_lines(&["20000,20005", "19900,20001"]),
        vec![(19900, 20005)]);
}
#[test]
fn contained_range_is_absorbed() {
    assert_eq!(reduce_lines(&["35000,36000", "35500,35505"]),
        vec![(35000, 36000)]);
}
#[test]
fn overarching_range_absorbs() {
    assert_eq!(reduce_lines(&["40000,45000", "39995,45005"]),
        vec![(39995, 45005)]);
}
#[test]
fn gap_between_ranges_is_preserved() {
    assert_eq!(reduce_lines(&["60001,60001", "60003,60005"]),
        vec![(60001, 60001), (60003, 60005)]);
}
#[test]
fn adjacent_ranges_merge() {
    assert_eq!(reduce_lines(&["70001,70002", "70003,70005"]),
        vec![(70001, 70005)]);
}
#[test]
fn duplicate_ranges_collapse() {
    assert_eq!(reduce_lines(&["00001,00003", "00001,00003"]),
        vec![(1, 3)]);
}
#[test]
fn final_value_closes_run() {
    assert_eq!(reduce_lines(&["99999,99999"]), vec![(99999, 99999)]);
    assert_eq!(reduce_lines(&["99999,99999", "99999,99999"]),
        vec![(99999, 99999)]);
    assert_eq!(reduce_lines(&["99990,99999"]), vec![(99990, 99999)]);
}
#[test]
fn first_value_opens_run() {
    assert_eq!(reduce_lines(&["1,1", "3,4"]), vec![(1, 1), (3, 4)]);
}
#[test]
fn no_marks() {
    let tracker = MembershipTracker::<u32>::default();
    assert!(tracker.reduce(true).is_empty());
    let background = tracker.reduce(false);
    assert_eq!(background.len(), 1);
    assert_eq!((background[0].lower(), background[0].upper()), (1, 99999));
}
#[test]
fn unflagged_cover_of_merge() {
    let mut tracker = MembershipTracker::<u32>::default();
    tracker.mark(&tracker.range(10000, 10005).unwrap());
    tracker.mark(&tracker.range(10002, 10009).unwrap());
    tracker.mark(&tracker.range(99999, 99999).unwrap());
    let background: Vec<(u32, u32)> = tracker.reduce(false).iter()
        .map(|range| (range.lower(), range.upper()))
        .collect();
    assert_eq!(background, vec![(1, 9999), (10010, 99998)]);
}
#[test]
fn input_order_is_irrelevant() {
    let lines = ["35000,36000", "10000,10005", "35500,35505", "10002,10009", "60003,60005"];
    let mut reversed = lines;
    reversed.reverse();
    assert_eq!(reduce_lines(&lines), reduce_lines(&reversed));
}
#[test]
fn reset_then_reuse() {
    let domain = Domain::<u32>::default();
    let mut tracker = MembershipTracker::new(domain);
    tracker.mark(&BoundedRange::new(10000, 10005, &domain).unwrap());
    tracker.reset(false);
    tracker.mark(&BoundedRange::new(20000, 20005, &domain).unwrap());
    let reduced: Vec<String> = tracker.reduce(true).iter()
        .map(|range| range.to_string())
        .collect();
    assert_eq!(reduced, vec!["[20000,20005]"]);
}
