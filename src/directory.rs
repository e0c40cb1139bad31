// Directory block: 7 fixed-width entries packed into the first 455 bytes
// of a 512-byte block, an out-of-band type-tag table in the next 7 bytes,
// 50 bytes of zero padding after that. Same shape as the teacher's
// dirlookup/dirlink (kernel/src/fs/fs.rs), but entries live in a fixed
// 7-slot block instead of xv6's byte-stream-of-Dirent-records file.

use crate::error::{Error, Result};
use crate::layout::{
    BlockId, FileKind, BLOCK_SIZE, DIR_ENTRIES_PER_BLOCK, DIR_ENTRY_NAME_LEN, DIR_ENTRY_SIZE,
    DIR_TYPE_TABLE_OFFSET,
};

#[derive(Debug, Clone, Copy)]
pub struct RawDirEntry {
    pub name: [u8; DIR_ENTRY_NAME_LEN],
    pub inode_number: u8,
}

impl RawDirEntry {
    pub const FREE: RawDirEntry = RawDirEntry {
        name: [0u8; DIR_ENTRY_NAME_LEN],
        inode_number: 0,
    };

    pub fn is_free(&self) -> bool {
        self.inode_number == 0
    }

    pub fn name_str(&self) -> &str {
        let len = self.name.iter().position(|&b| b == 0).unwrap_or(self.name.len());
        std::str::from_utf8(&self.name[..len]).unwrap_or("")
    }

    fn named(name: &str, inode_number: u8) -> Result<RawDirEntry> {
        if name.is_empty() || name.len() > DIR_ENTRY_NAME_LEN - 1 {
            return Err(Error::InvalidArgument("directory entry name too long"));
        }
        let mut buf = [0u8; DIR_ENTRY_NAME_LEN];
        buf[..name.len()].copy_from_slice(name.as_bytes());
        Ok(RawDirEntry {
            name: buf,
            inode_number,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DirectoryBlock {
    bytes: [u8; BLOCK_SIZE],
}

impl DirectoryBlock {
    pub fn empty() -> Self {
        Self {
            bytes: [0u8; BLOCK_SIZE],
        }
    }

    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn to_bytes(self) -> [u8; BLOCK_SIZE] {
        self.bytes
    }

    fn entry_offset(slot: usize) -> usize {
        slot * DIR_ENTRY_SIZE
    }

    pub fn entry(&self, slot: usize) -> (RawDirEntry, FileKind) {
        assert!(slot < DIR_ENTRIES_PER_BLOCK);
        let off = Self::entry_offset(slot);
        let mut name = [0u8; DIR_ENTRY_NAME_LEN];
        name.copy_from_slice(&self.bytes[off..off + DIR_ENTRY_NAME_LEN]);
        let inode_number = self.bytes[off + DIR_ENTRY_NAME_LEN];
        let tag = self.bytes[DIR_TYPE_TABLE_OFFSET + slot];
        let kind = FileKind::from_tag(tag).unwrap_or(FileKind::Regular);
        (RawDirEntry { name, inode_number }, kind)
    }

    fn write_entry(&mut self, slot: usize, entry: &RawDirEntry, kind: FileKind) {
        assert!(slot < DIR_ENTRIES_PER_BLOCK);
        let off = Self::entry_offset(slot);
        self.bytes[off..off + DIR_ENTRY_NAME_LEN].copy_from_slice(&entry.name);
        self.bytes[off + DIR_ENTRY_NAME_LEN] = entry.inode_number;
        self.bytes[DIR_TYPE_TABLE_OFFSET + slot] = kind.tag();
    }

    pub fn set_entry(&mut self, slot: usize, name: &str, inode_id: u8, kind: FileKind) -> Result<()> {
        let entry = RawDirEntry::named(name, inode_id)?;
        self.write_entry(slot, &entry, kind);
        Ok(())
    }

    pub fn clear_entry(&mut self, slot: usize) {
        self.write_entry(slot, &RawDirEntry::FREE, FileKind::Regular);
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, RawDirEntry, FileKind)> + '_ {
        (0..DIR_ENTRIES_PER_BLOCK).map(move |slot| {
            let (entry, kind) = self.entry(slot);
            (slot, entry, kind)
        })
    }

    pub fn find(&self, name: &str) -> Option<(usize, RawDirEntry, FileKind)> {
        self.iter()
            .find(|(_, entry, _)| !entry.is_free() && entry.name_str() == name)
    }

    // Lowest free slot for inserting `name`; fails if the name already
    // exists or every slot is occupied.
    pub fn find_free_slot(&self, name: &str) -> Result<usize> {
        if self.find(name).is_some() {
            return Err(Error::AlreadyExists);
        }
        self.iter()
            .find(|(_, entry, _)| entry.is_free())
            .map(|(slot, _, _)| slot)
            .ok_or(Error::OutOfSpace)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, entry, _)| entry.is_free())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_has_no_entries() {
        let block = DirectoryBlock::empty();
        assert!(block.is_empty());
        assert!(block.find("anything").is_none());
        assert_eq!(block.find_free_slot("a").unwrap(), 0);
    }

    #[test]
    fn set_and_find_entry() {
        let mut block = DirectoryBlock::empty();
        block.set_entry(2, "hello", 5, FileKind::Directory).unwrap();
        let (slot, entry, kind) = block.find("hello").unwrap();
        assert_eq!(slot, 2);
        assert_eq!(entry.inode_number, 5);
        assert_eq!(kind, FileKind::Directory);
    }

    #[test]
    fn find_free_slot_rejects_duplicate_name() {
        let mut block = DirectoryBlock::empty();
        block.set_entry(0, "dup", 1, FileKind::Regular).unwrap();
        assert!(matches!(block.find_free_slot("dup"), Err(Error::AlreadyExists)));
    }

    #[test]
    fn find_free_slot_fails_when_full() {
        let mut block = DirectoryBlock::empty();
        for slot in 0..DIR_ENTRIES_PER_BLOCK {
            block
                .set_entry(slot, &format!("f{slot}"), (slot + 1) as u8, FileKind::Regular)
                .unwrap();
        }
        assert!(matches!(block.find_free_slot("new"), Err(Error::OutOfSpace)));
    }

    #[test]
    fn clear_entry_frees_slot() {
        let mut block = DirectoryBlock::empty();
        block.set_entry(1, "gone", 9, FileKind::Regular).unwrap();
        block.clear_entry(1);
        assert!(block.find("gone").is_none());
        assert_eq!(block.find_free_slot("gone").unwrap(), 1);
    }

    #[test]
    fn roundtrips_through_bytes() {
        let mut block = DirectoryBlock::empty();
        block.set_entry(0, "a", 1, FileKind::Directory).unwrap();
        block.set_entry(6, "z", 2, FileKind::Regular).unwrap();
        let bytes = block.to_bytes();
        let back = DirectoryBlock::from_bytes(bytes);
        assert_eq!(back.find("a").unwrap().2, FileKind::Directory);
        assert_eq!(back.find("z").unwrap().2, FileKind::Regular);
    }
}
