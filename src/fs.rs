// The mount handle: resolves paths, manages descriptors, and wires the
// block store, inode table, and directory blocks together into the
// format/mount/create/open/read/write/seek/remove/read_dir/unmount
// surface. Path resolution and the create/open flow follow the teacher's
// namei/namex/create/sys_open (kernel/src/fs/fs.rs,
// kernel/src/syscall/sysfile.rs); the descriptor table follows
// fileclose/FTable (kernel/src/file/mod.rs), simplified since there is one
// mounted filesystem per FileSystem value and no open() mode flags.

use std::path::Path;

use crate::bitmap::Bitmap;
use crate::block_store::BlockStore;
use crate::directory::DirectoryBlock;
use crate::error::{Error, Result};
use crate::file;
use crate::layout::{
    now, BlockId, FileKind, InodeId, RawInode, RawSuperBlock, BLOCK_SIZE, DIRECTORY_MODE,
    INODES_PER_BLOCK, INODE_SIZE, INODE_TABLE_START, MAX_OPEN_FILES, NUM_INODES, REGULAR_MODE,
    ROOT_INODE, SUPERBLOCK_ID,
};
use crate::path::split_path;

#[derive(Debug, Clone)]
pub struct DirEntryInfo {
    pub name: String,
    pub inode: u8,
    pub kind: FileKind,
}

// Opaque handle; created by open() and consumed by read/write/seek/close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fd(u32);

struct Descriptor {
    inode: InodeId,
    position: i64,
}

pub struct FileSystem {
    store: BlockStore,
    superblock: RawSuperBlock,
    descriptors: Vec<Option<Descriptor>>,
    descriptor_bitmap: Bitmap,
}

impl FileSystem {
    // A zeroed device, an empty inode table, and a root directory
    // occupying inode 0 with no entries.
    pub fn format(path: &Path) -> Result<FileSystem> {
        let mut store = BlockStore::create(path)?;

        let zero_inode_block = [0u8; BLOCK_SIZE];
        for i in 0..(NUM_INODES / INODES_PER_BLOCK) {
            store.write(BlockId((INODE_TABLE_START + i) as u16), &zero_inode_block)?;
        }

        let superblock = RawSuperBlock {
            inode_bitmap: [0u8; (NUM_INODES / 8) as usize],
            block_size: BLOCK_SIZE as u32,
            total_blocks: crate::layout::NUM_BLOCKS,
            free_blocks: store.free_blocks(),
        };

        let mut fs = FileSystem {
            store,
            superblock,
            descriptors: (0..MAX_OPEN_FILES).map(|_| None).collect(),
            descriptor_bitmap: Bitmap::create(MAX_OPEN_FILES),
        };

        let root = fs.alloc_inode(FileKind::Directory)?;
        debug_assert_eq!(root, ROOT_INODE);

        let final_superblock = fs.superblock.clone();
        fs.flush_superblock(&final_superblock)?;
        log::info!("formatted new filesystem image at {:?}", path);
        Ok(fs)
    }

    pub fn mount(path: &Path) -> Result<FileSystem> {
        let mut store = BlockStore::open(path)?;
        let mut buf = [0u8; BLOCK_SIZE];
        store.read(BlockId(SUPERBLOCK_ID as u16), &mut buf)?;
        let superblock = RawSuperBlock::from_bytes(&buf);
        log::info!("mounted filesystem image at {:?}", path);
        Ok(FileSystem {
            store,
            superblock,
            descriptors: (0..MAX_OPEN_FILES).map(|_| None).collect(),
            descriptor_bitmap: Bitmap::create(MAX_OPEN_FILES),
        })
    }

    // Descriptors still open at this point are simply dropped.
    pub fn unmount(self) -> Result<()> {
        self.store.destroy()
    }

    fn flush_superblock(&mut self, superblock: &RawSuperBlock) -> Result<()> {
        self.store.write(BlockId(SUPERBLOCK_ID as u16), &superblock.to_bytes())?;
        self.superblock = superblock.clone();
        Ok(())
    }

    fn inode_location(id: InodeId) -> (BlockId, usize) {
        let index = id.0 as u32;
        let block = INODE_TABLE_START + index / INODES_PER_BLOCK;
        let offset = (index % INODES_PER_BLOCK) as usize * INODE_SIZE;
        (BlockId(block as u16), offset)
    }

    fn read_inode(&mut self, id: InodeId) -> Result<RawInode> {
        let (block, offset) = Self::inode_location(id);
        let mut buf = [0u8; BLOCK_SIZE];
        self.store.read(block, &mut buf)?;
        Ok(RawInode::from_bytes(&buf[offset..offset + INODE_SIZE]))
    }

    fn write_inode(&mut self, id: InodeId, inode: &RawInode) -> Result<()> {
        let (block, offset) = Self::inode_location(id);
        let mut buf = [0u8; BLOCK_SIZE];
        self.store.read(block, &mut buf)?;
        buf[offset..offset + INODE_SIZE].copy_from_slice(&inode.to_bytes());
        self.store.write(block, &buf)
    }

    fn inode_in_use(&self, id: InodeId) -> bool {
        let idx = id.0 as usize;
        self.superblock.inode_bitmap[idx / 8] & (1 << (idx % 8)) != 0
    }

    fn mark_inode(&mut self, id: InodeId, used: bool) {
        let idx = id.0 as usize;
        if used {
            self.superblock.inode_bitmap[idx / 8] |= 1 << (idx % 8);
        } else {
            self.superblock.inode_bitmap[idx / 8] &= !(1 << (idx % 8));
        }
    }

    fn alloc_inode(&mut self, kind: FileKind) -> Result<InodeId> {
        let free = (0..NUM_INODES as usize)
            .find(|&i| !self.inode_in_use(InodeId(i as u8)))
            .ok_or_else(|| {
                log::warn!("inode table exhausted: no free inode");
                Error::OutOfSpace
            })?;
        let id = InodeId(free as u8);
        self.mark_inode(id, true);

        let mut inode = RawInode {
            file_mode: if matches!(kind, FileKind::Directory) {
                DIRECTORY_MODE
            } else {
                REGULAR_MODE
            },
            link_count: 1,
            change_time: now(),
            modification_time: now(),
            access_time: now(),
            ..RawInode::default()
        };

        if matches!(kind, FileKind::Directory) {
            // A directory always has its first block, even when empty.
            match self.store.allocate() {
                Ok(block_id) => {
                    self.store.write(block_id, &DirectoryBlock::empty().to_bytes())?;
                    inode.direct_blocks[0] = block_id;
                    inode.file_size = BLOCK_SIZE as i32;
                }
                Err(e) => {
                    self.mark_inode(id, false);
                    return Err(e);
                }
            }
        }

        self.write_inode(id, &inode)?;

        let superblock = self.superblock.clone();
        self.flush_superblock(&superblock)?;
        Ok(id)
    }

    fn free_inode(&mut self, id: InodeId) -> Result<()> {
        self.mark_inode(id, false);
        self.write_inode(id, &RawInode::default())?;
        let superblock = self.superblock.clone();
        self.flush_superblock(&superblock)
    }

    fn lookup_in_dir(
        &mut self,
        parent: &mut RawInode,
        name: &str,
    ) -> Result<Option<(usize, usize, InodeId, FileKind)>> {
        let logical_blocks = (parent.file_size as usize).div_ceil(BLOCK_SIZE).max(0);
        for logical in 0..logical_blocks {
            let Some(block_id) = file::map_block(&mut self.store, parent, logical, false)? else {
                continue;
            };
            let mut buf = [0u8; BLOCK_SIZE];
            self.store.read(block_id, &mut buf)?;
            let dir_block = DirectoryBlock::from_bytes(buf);
            if let Some((slot, entry, kind)) = dir_block.find(name) {
                return Ok(Some((logical, slot, InodeId(entry.inode_number), kind)));
            }
        }
        Ok(None)
    }

    fn insert_in_dir(&mut self, parent_id: InodeId, parent: &mut RawInode, name: &str, inode_id: InodeId, kind: FileKind) -> Result<()> {
        let logical_blocks = (parent.file_size as usize).div_ceil(BLOCK_SIZE).max(0);

        for logical in 0..logical_blocks {
            let Some(block_id) = file::map_block(&mut self.store, parent, logical, false)? else {
                continue;
            };
            let mut buf = [0u8; BLOCK_SIZE];
            self.store.read(block_id, &mut buf)?;
            let mut dir_block = DirectoryBlock::from_bytes(buf);
            match dir_block.find_free_slot(name) {
                Ok(slot) => {
                    dir_block.set_entry(slot, name, inode_id.0, kind)?;
                    self.store.write(block_id, &dir_block.to_bytes())?;
                    self.write_inode(parent_id, parent)?;
                    return Ok(());
                }
                Err(Error::OutOfSpace) => continue,
                Err(e) => return Err(e),
            }
        }

        // every existing block is full (or the directory is empty): append one.
        let position = parent.file_size as i64;
        let mut dir_block = DirectoryBlock::empty();
        dir_block.set_entry(0, name, inode_id.0, kind)?;
        let written = file::write(&mut self.store, parent, position, &dir_block.to_bytes())?;
        if written < BLOCK_SIZE {
            return Err(Error::OutOfSpace);
        }
        self.write_inode(parent_id, parent)
    }

    fn remove_from_dir(&mut self, parent_id: InodeId, parent: &mut RawInode, logical: usize, slot: usize) -> Result<()> {
        let block_id = file::map_block(&mut self.store, parent, logical, false)?
            .ok_or(Error::Corruption("directory entry points at unmapped block"))?;
        let mut buf = [0u8; BLOCK_SIZE];
        self.store.read(block_id, &mut buf)?;
        let mut dir_block = DirectoryBlock::from_bytes(buf);
        dir_block.clear_entry(slot);
        self.store.write(block_id, &dir_block.to_bytes())?;
        self.write_inode(parent_id, parent)
    }

    fn resolve_parent(&mut self, ancestors: &[String]) -> Result<(InodeId, RawInode)> {
        let mut current_id = ROOT_INODE;
        let mut current = self.read_inode(current_id)?;

        for segment in ancestors {
            let Some((_, _, next_id, kind)) = self.lookup_in_dir(&mut current, segment)? else {
                return Err(Error::NotFound);
            };
            if !matches!(kind, FileKind::Directory) {
                return Err(Error::NotADirectory);
            }
            current_id = next_id;
            current = self.read_inode(current_id)?;
        }
        Ok((current_id, current))
    }

    fn resolve(&mut self, path: &str) -> Result<(InodeId, RawInode, FileKind)> {
        let (ancestors, leaf) = split_path(path)?;
        if leaf.is_empty() {
            if ancestors.is_empty() {
                let inode = self.read_inode(ROOT_INODE)?;
                return Ok((ROOT_INODE, inode, FileKind::Directory));
            }
            return Err(Error::InvalidArgument("path must not end in a slash"));
        }
        let (parent_id, mut parent) = self.resolve_parent(&ancestors)?;
        let Some((_, _, id, kind)) = self.lookup_in_dir(&mut parent, &leaf)? else {
            return Err(Error::NotFound);
        };
        let inode = self.read_inode(id)?;
        Ok((id, inode, kind))
    }

    pub fn create(&mut self, path: &str, kind: FileKind) -> Result<()> {
        let (ancestors, leaf) = split_path(path)?;
        if leaf.is_empty() {
            return Err(Error::InvalidArgument("path must name a file or directory"));
        }
        let (parent_id, mut parent) = self.resolve_parent(&ancestors)?;
        if self.lookup_in_dir(&mut parent, &leaf)?.is_some() {
            return Err(Error::AlreadyExists);
        }

        let new_id = self.alloc_inode(kind)?;
        if let Err(e) = self.insert_in_dir(parent_id, &mut parent, &leaf, new_id, kind) {
            self.free_inode(new_id)?;
            return Err(e);
        }
        Ok(())
    }

    pub fn open(&mut self, path: &str) -> Result<Fd> {
        let (_, _, kind) = self.resolve(path)?;
        if !matches!(kind, FileKind::Regular) {
            return Err(Error::IsADirectory);
        }
        let (ancestors, leaf) = split_path(path)?;
        let (_, mut parent) = self.resolve_parent(&ancestors)?;
        let (_, _, inode_id, _) = self.lookup_in_dir(&mut parent, &leaf)?.ok_or(Error::NotFound)?;

        let slot = self.descriptor_bitmap.first_free_zero().ok_or_else(|| {
            log::warn!("descriptor table exhausted: no free descriptor");
            Error::OutOfSpace
        })?;
        self.descriptor_bitmap.set(slot);
        self.descriptors[slot] = Some(Descriptor { inode: inode_id, position: 0 });
        Ok(Fd(slot as u32))
    }

    pub fn close(&mut self, fd: Fd) -> Result<()> {
        let slot = fd.0 as usize;
        if slot >= MAX_OPEN_FILES || !self.descriptor_bitmap.test(slot) {
            return Err(Error::InvalidArgument("descriptor is not open"));
        }
        self.descriptor_bitmap.reset(slot);
        self.descriptors[slot] = None;
        Ok(())
    }

    fn descriptor(&self, fd: Fd) -> Result<&Descriptor> {
        let slot = fd.0 as usize;
        if slot >= MAX_OPEN_FILES {
            return Err(Error::InvalidArgument("descriptor is not open"));
        }
        self.descriptors[slot].as_ref().ok_or(Error::InvalidArgument("descriptor is not open"))
    }

    // Clamps the resulting offset into [0, fileSize].
    pub fn seek(&mut self, fd: Fd, whence: crate::layout::SeekFrom) -> Result<i64> {
        let inode_id = self.descriptor(fd)?.inode;
        let size = self.read_inode(inode_id)?.file_size as i64;
        let current = self.descriptor(fd)?.position;

        let requested = match whence {
            crate::layout::SeekFrom::Set(offset) => offset,
            crate::layout::SeekFrom::Cur(offset) => current + offset,
            crate::layout::SeekFrom::End(offset) => size + offset,
        };
        let new_position = requested.clamp(0, size);

        let slot = fd.0 as usize;
        self.descriptors[slot].as_mut().expect("checked above").position = new_position;
        Ok(new_position)
    }

    pub fn read(&mut self, fd: Fd, buf: &mut [u8]) -> Result<usize> {
        let (inode_id, position) = {
            let d = self.descriptor(fd)?;
            (d.inode, d.position)
        };
        let mut inode = self.read_inode(inode_id)?;
        let n = file::read(&mut self.store, &mut inode, position, buf)?;
        inode.access_time = now();
        self.write_inode(inode_id, &inode)?;
        self.descriptors[fd.0 as usize].as_mut().expect("checked above").position += n as i64;
        Ok(n)
    }

    // A short write (fewer bytes than requested) means the device ran out
    // of space.
    pub fn write(&mut self, fd: Fd, buf: &[u8]) -> Result<usize> {
        let (inode_id, position) = {
            let d = self.descriptor(fd)?;
            (d.inode, d.position)
        };
        let mut inode = self.read_inode(inode_id)?;
        let n = file::write(&mut self.store, &mut inode, position, buf)?;
        inode.modification_time = now();
        self.write_inode(inode_id, &inode)?;
        self.descriptors[fd.0 as usize].as_mut().expect("checked above").position += n as i64;

        let mut sb = self.superblock.clone();
        sb.free_blocks = self.store.free_blocks();
        self.flush_superblock(&sb)?;
        Ok(n)
    }

    // Regular files are unlinked and their blocks released; directories
    // must be empty.
    pub fn remove(&mut self, path: &str) -> Result<()> {
        let (ancestors, leaf) = split_path(path)?;
        if leaf.is_empty() {
            return Err(Error::InvalidArgument("cannot remove the root directory"));
        }
        let (parent_id, mut parent) = self.resolve_parent(&ancestors)?;
        let (logical, slot, inode_id, kind) =
            self.lookup_in_dir(&mut parent, &leaf)?.ok_or(Error::NotFound)?;

        let mut target = self.read_inode(inode_id)?;
        if matches!(kind, FileKind::Directory) {
            let logical_blocks = (target.file_size as usize).div_ceil(BLOCK_SIZE);
            for l in 0..logical_blocks {
                if let Some(block_id) = file::map_block(&mut self.store, &mut target, l, false)? {
                    let mut buf = [0u8; BLOCK_SIZE];
                    self.store.read(block_id, &mut buf)?;
                    if !DirectoryBlock::from_bytes(buf).is_empty() {
                        return Err(Error::NotEmpty);
                    }
                }
            }
        }

        self.remove_from_dir(parent_id, &mut parent, logical, slot)?;
        file::truncate_and_release(&mut self.store, &mut target)?;
        self.write_inode(inode_id, &target)?;
        self.free_inode(inode_id)
    }

    pub fn read_dir(&mut self, path: &str) -> Result<Vec<DirEntryInfo>> {
        let (_, mut inode, kind) = self.resolve(path)?;
        if !matches!(kind, FileKind::Directory) {
            return Err(Error::NotADirectory);
        }

        let mut entries = Vec::new();
        let logical_blocks = (inode.file_size as usize).div_ceil(BLOCK_SIZE);
        for logical in 0..logical_blocks {
            let Some(block_id) = file::map_block(&mut self.store, &mut inode, logical, false)? else {
                continue;
            };
            let mut buf = [0u8; BLOCK_SIZE];
            self.store.read(block_id, &mut buf)?;
            let dir_block = DirectoryBlock::from_bytes(buf);
            for (_, entry, entry_kind) in dir_block.iter() {
                if !entry.is_free() {
                    entries.push(DirEntryInfo {
                        name: entry.name_str().to_string(),
                        inode: entry.inode_number,
                        kind: entry_kind,
                    });
                }
            }
        }
        Ok(entries)
    }

    pub fn free_blocks(&self) -> u32 {
        self.store.free_blocks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SeekFrom;
    use tempfile::NamedTempFile;

    fn new_fs() -> (FileSystem, NamedTempFile) {
        let _ = env_logger::try_init();
        let tmp = NamedTempFile::new().unwrap();
        let fs = FileSystem::format(tmp.path()).unwrap();
        (fs, tmp)
    }

    #[test]
    fn freshly_formatted_root_is_empty_directory() {
        let (mut fs, _tmp) = new_fs();
        let entries = fs.read_dir("/").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn create_and_list_file_in_root() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/a.txt", FileKind::Regular).unwrap();
        let entries = fs.read_dir("/").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a.txt");
        assert_eq!(entries[0].kind, FileKind::Regular);
    }

    #[test]
    fn create_rejects_duplicate_name() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/a.txt", FileKind::Regular).unwrap();
        assert!(matches!(fs.create("/a.txt", FileKind::Regular), Err(Error::AlreadyExists)));
    }

    #[test]
    fn create_rejects_missing_ancestor() {
        let (mut fs, _tmp) = new_fs();
        assert!(matches!(fs.create("/no/such/dir/a.txt", FileKind::Regular), Err(Error::NotFound)));
    }

    #[test]
    fn new_directory_has_its_block_allocated_even_when_empty() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/sub", FileKind::Directory).unwrap();
        let (id, _, _) = fs.resolve("/sub").unwrap();
        let inode = fs.read_inode(id).unwrap();
        assert_eq!(inode.file_size, BLOCK_SIZE as i32);
        assert!(!inode.direct_blocks[0].is_none());
    }

    #[test]
    fn nested_directory_create_and_list() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/sub", FileKind::Directory).unwrap();
        fs.create("/sub/inner.txt", FileKind::Regular).unwrap();
        let entries = fs.read_dir("/sub").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "inner.txt");
    }

    #[test]
    fn write_then_read_through_descriptor() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/a.txt", FileKind::Regular).unwrap();
        let fd = fs.open("/a.txt").unwrap();
        let n = fs.write(fd, b"hello world").unwrap();
        assert_eq!(n, 11);

        fs.seek(fd, SeekFrom::Set(0)).unwrap();
        let mut buf = [0u8; 11];
        let read_n = fs.read(fd, &mut buf).unwrap();
        assert_eq!(read_n, 11);
        assert_eq!(&buf, b"hello world");
        fs.close(fd).unwrap();
    }

    #[test]
    fn seek_clamps_negative_offset_to_zero() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/a.txt", FileKind::Regular).unwrap();
        let fd = fs.open("/a.txt").unwrap();
        let pos = fs.seek(fd, SeekFrom::Cur(-100)).unwrap();
        assert_eq!(pos, 0);
    }

    #[test]
    fn seek_clamps_past_end_to_file_size() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/a.txt", FileKind::Regular).unwrap();
        let fd = fs.open("/a.txt").unwrap();
        fs.write(fd, &[1, 2, 3]).unwrap();
        let pos = fs.seek(fd, SeekFrom::End(50)).unwrap();
        assert_eq!(pos, 3);
    }

    #[test]
    fn open_reuses_lowest_free_descriptor_slot() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/a.txt", FileKind::Regular).unwrap();
        let first = fs.open("/a.txt").unwrap();
        fs.close(first).unwrap();
        let second = fs.open("/a.txt").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn open_fails_once_descriptor_table_is_full() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/a.txt", FileKind::Regular).unwrap();
        let mut fds = Vec::new();
        for _ in 0..MAX_OPEN_FILES {
            fds.push(fs.open("/a.txt").unwrap());
        }
        assert!(matches!(fs.open("/a.txt"), Err(Error::OutOfSpace)));
        fs.close(fds.pop().unwrap()).unwrap();
        assert!(fs.open("/a.txt").is_ok());
    }

    #[test]
    fn open_rejects_directories() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/sub", FileKind::Directory).unwrap();
        assert!(matches!(fs.open("/sub"), Err(Error::IsADirectory)));
    }

    #[test]
    fn remove_regular_file_frees_its_blocks() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/a.txt", FileKind::Regular).unwrap();
        let fd = fs.open("/a.txt").unwrap();
        fs.write(fd, &vec![1u8; 4000]).unwrap();
        fs.close(fd).unwrap();

        let free_before = fs.free_blocks();
        fs.remove("/a.txt").unwrap();
        assert!(fs.free_blocks() > free_before);
        assert!(fs.read_dir("/").unwrap().is_empty());
    }

    #[test]
    fn remove_rejects_nonempty_directory() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/sub", FileKind::Directory).unwrap();
        fs.create("/sub/a.txt", FileKind::Regular).unwrap();
        assert!(matches!(fs.remove("/sub"), Err(Error::NotEmpty)));
    }

    #[test]
    fn create_after_remove_reuses_inode_and_name() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/a.txt", FileKind::Regular).unwrap();
        fs.remove("/a.txt").unwrap();
        fs.create("/a.txt", FileKind::Regular).unwrap();
        assert_eq!(fs.read_dir("/").unwrap().len(), 1);
    }

    #[test]
    fn remount_preserves_directory_contents() {
        let tmp = NamedTempFile::new().unwrap();
        {
            let mut fs = FileSystem::format(tmp.path()).unwrap();
            fs.create("/a.txt", FileKind::Regular).unwrap();
            let fd = fs.open("/a.txt").unwrap();
            fs.write(fd, b"persisted").unwrap();
            fs.close(fd).unwrap();
            fs.unmount().unwrap();
        }

        let mut fs = FileSystem::mount(tmp.path()).unwrap();
        let entries = fs.read_dir("/").unwrap();
        assert_eq!(entries.len(), 1);
        let fd = fs.open("/a.txt").unwrap();
        let mut buf = [0u8; 9];
        fs.read(fd, &mut buf).unwrap();
        assert_eq!(&buf, b"persisted");
    }

    #[test]
    fn large_write_spans_indirect_blocks() {
        let (mut fs, _tmp) = new_fs();
        fs.create("/big.bin", FileKind::Regular).unwrap();
        let fd = fs.open("/big.bin").unwrap();
        let data = vec![42u8; 200_000];
        let n = fs.write(fd, &data).unwrap();
        assert_eq!(n, 200_000);

        fs.seek(fd, SeekFrom::Set(0)).unwrap();
        let mut out = vec![0u8; 200_000];
        let read_n = fs.read(fd, &mut out).unwrap();
        assert_eq!(read_n, 200_000);
        assert_eq!(out, data);
    }
}
