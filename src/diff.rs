use crate::events::{ChangeEvent, ChangeKind};
use crate::snapshot::Snapshot;

/// Computes the change events between two snapshots.
///
/// Digest equality is the sole modification test; size and mtime never
/// trigger or suppress an event. Output is deterministic regardless of walk
/// order: created events first, then modified, then deleted, each group in
/// ascending lexical path order.
pub fn diff(previous: &Snapshot, current: &Snapshot) -> Vec<ChangeEvent> {
    let mut created = Vec::new();
    let mut modified = Vec::new();
    let mut deleted = Vec::new();

    for (path, record) in current.iter() {
        match previous.get(path) {
            None => created.push(path.clone()),
            Some(prev) if prev.digest != record.digest => modified.push(path.clone()),
            Some(_) => {}
        }
    }

    for path in previous.paths() {
        if !current.contains(path) {
            deleted.push(path.clone());
        }
    }

    created.sort();
    modified.sort();
    deleted.sort();

    let mut events = Vec::with_capacity(created.len() + modified.len() + deleted.len());
    events.extend(created.into_iter().map(|p| ChangeEvent::new(ChangeKind::Created, p)));
    events.extend(modified.into_iter().map(|p| ChangeEvent::new(ChangeKind::Modified, p)));
    events.extend(deleted.into_iter().map(|p| ChangeEvent::new(ChangeKind::Deleted, p)));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::FileRecord;
    use std::time::SystemTime;

    fn record(tag: u8) -> FileRecord {
        FileRecord {
            digest: [tag; 32],
            size: tag as u64,
            modified: SystemTime::UNIX_EPOCH,
        }
    }

    fn snapshot(entries: &[(&str, u8)]) -> Snapshot {
        entries
            .iter()
            .map(|(path, tag)| (path.to_string(), record(*tag)))
            .collect()
    }

    #[test]
    fn test_identical_snapshots_yield_nothing() {
        let snap = snapshot(&[("a.txt", 1), ("b/c.txt", 2)]);
        assert!(diff(&snap, &snap).is_empty());
    }

    #[test]
    fn test_all_created_from_empty_baseline() {
        let curr = snapshot(&[("z.txt", 1), ("a.txt", 2), ("m.txt", 3)]);
        let events = diff(&Snapshot::empty(), &curr);

        assert_eq!(
            events,
            vec![
                ChangeEvent::new(ChangeKind::Created, "a.txt"),
                ChangeEvent::new(ChangeKind::Created, "m.txt"),
                ChangeEvent::new(ChangeKind::Created, "z.txt"),
            ]
        );
    }

    #[test]
    fn test_all_deleted_against_empty_current() {
        let prev = snapshot(&[("b.txt", 1), ("a.txt", 2)]);
        let events = diff(&prev, &Snapshot::empty());

        assert_eq!(
            events,
            vec![
                ChangeEvent::new(ChangeKind::Deleted, "a.txt"),
                ChangeEvent::new(ChangeKind::Deleted, "b.txt"),
            ]
        );
    }

    #[test]
    fn test_digest_change_is_modified() {
        let prev = snapshot(&[("f.py", 1)]);
        let curr = snapshot(&[("f.py", 2)]);

        assert_eq!(
            diff(&prev, &curr),
            vec![ChangeEvent::new(ChangeKind::Modified, "f.py")]
        );
    }

    #[test]
    fn test_metadata_alone_does_not_modify() {
        let prev = snapshot(&[("touched.txt", 7)]);
        let mut curr_record = record(7);
        curr_record.size = 999;
        curr_record.modified = SystemTime::now();
        let curr: Snapshot = [("touched.txt".to_string(), curr_record)].into_iter().collect();

        assert!(diff(&prev, &curr).is_empty());
    }

    #[test]
    fn test_event_groups_are_ordered() {
        let prev = snapshot(&[("changed.txt", 1), ("removed.txt", 2), ("same.txt", 3)]);
        let curr = snapshot(&[
            ("changed.txt", 9),
            ("same.txt", 3),
            ("new_b.txt", 4),
            ("new_a.txt", 5),
        ]);

        let events = diff(&prev, &curr);
        assert_eq!(
            events,
            vec![
                ChangeEvent::new(ChangeKind::Created, "new_a.txt"),
                ChangeEvent::new(ChangeKind::Created, "new_b.txt"),
                ChangeEvent::new(ChangeKind::Modified, "changed.txt"),
                ChangeEvent::new(ChangeKind::Deleted, "removed.txt"),
            ]
        );
    }
}
