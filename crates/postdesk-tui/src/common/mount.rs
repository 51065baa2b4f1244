/// Identity of one screen mount.
///
/// Every navigation mints a fresh id; async results carry the id of the
/// mount that requested them and are dropped when it no longer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(pub u64);

#[derive(Debug, Default)]
pub struct MountSeq {
    next: u64,
}

impl MountSeq {
    pub fn next_id(&mut self) -> MountId {
        let id = MountId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
