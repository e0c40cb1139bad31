// Fixed-geometry block device backed by a single host file. Same
// seek-then-read/write over a std::fs::File as mkfs/src/main.rs's
// wsect/rsect, but the free-block map is kept in memory as a Bitmap and
// flushed to its reserved trailing blocks after every mutation instead of
// xv6's on-disk bitmap blocks walked by hand.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::bitmap::Bitmap;
use crate::error::{Error, Result};
use crate::layout::{
    BlockId, BLOCK_SIZE, DATA_POOL_START, FREE_BITMAP_BLOCKS, FREE_BITMAP_START, IMAGE_SIZE,
    INODE_TABLE_BLOCKS, INODE_TABLE_START, NUM_BLOCKS, SUPERBLOCK_ID,
};

// A 65,536 x 512-byte block device, backed by a single file, with its own
// free-block bitmap occupying the last 16 blocks of the address space.
pub struct BlockStore {
    file: File,
    free_bitmap: Bitmap,
}

impl BlockStore {
    // Creates a new zero-filled image, pre-reserving the super-block, the
    // inode table, and the bitmap's own 16 blocks.
    pub fn create(path: &Path) -> Result<BlockStore> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(IMAGE_SIZE)?;

        let mut store = BlockStore {
            file,
            free_bitmap: Bitmap::create(NUM_BLOCKS as usize),
        };

        store.free_bitmap.set(SUPERBLOCK_ID as usize);
        for b in INODE_TABLE_START..INODE_TABLE_START + INODE_TABLE_BLOCKS {
            store.free_bitmap.set(b as usize);
        }
        for b in FREE_BITMAP_START..NUM_BLOCKS {
            store.free_bitmap.set(b as usize);
        }
        store.flush_bitmap()?;

        log::debug!(
            "created block store image ({} blocks, {} reserved)",
            NUM_BLOCKS,
            DATA_POOL_START + FREE_BITMAP_BLOCKS
        );
        Ok(store)
    }

    // Reconstructs the free-block bitmap from the trailing 16 blocks.
    // Fails unless the file is exactly IMAGE_SIZE bytes.
    pub fn open(path: &Path) -> Result<BlockStore> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let len = file.metadata()?.len();
        if len != IMAGE_SIZE {
            return Err(Error::Corruption("image size does not match device geometry"));
        }

        let mut store = BlockStore {
            file,
            free_bitmap: Bitmap::create(NUM_BLOCKS as usize),
        };
        store.load_bitmap()?;
        Ok(store)
    }

    fn flush_bitmap(&mut self) -> Result<()> {
        let bytes = self.free_bitmap.as_bytes().to_vec();
        for (i, block) in bytes.chunks(BLOCK_SIZE).enumerate() {
            let id = BlockId((FREE_BITMAP_START as usize + i) as u16);
            self.write_raw(id, block)?;
        }
        Ok(())
    }

    fn load_bitmap(&mut self) -> Result<()> {
        let mut bytes = vec![0u8; (FREE_BITMAP_BLOCKS as usize) * BLOCK_SIZE];
        for (i, chunk) in bytes.chunks_mut(BLOCK_SIZE).enumerate() {
            let id = BlockId((FREE_BITMAP_START as usize + i) as u16);
            let mut buf = [0u8; BLOCK_SIZE];
            self.read_raw(id, &mut buf)?;
            chunk.copy_from_slice(&buf);
        }
        self.free_bitmap = Bitmap::overlay(NUM_BLOCKS as usize, bytes);
        Ok(())
    }

    fn check_range(id: BlockId) -> Result<()> {
        if id.as_u32() >= NUM_BLOCKS {
            return Err(Error::InvalidArgument("block id out of range"));
        }
        Ok(())
    }

    fn read_raw(&mut self, id: BlockId, dst: &mut [u8]) -> Result<()> {
        debug_assert_eq!(dst.len(), BLOCK_SIZE);
        self.file.seek(SeekFrom::Start(id.as_u32() as u64 * BLOCK_SIZE as u64))?;
        self.file.read_exact(dst)?;
        Ok(())
    }

    fn write_raw(&mut self, id: BlockId, src: &[u8]) -> Result<()> {
        debug_assert_eq!(src.len(), BLOCK_SIZE);
        self.file.seek(SeekFrom::Start(id.as_u32() as u64 * BLOCK_SIZE as u64))?;
        self.file.write_all(src)?;
        Ok(())
    }

    pub fn allocate(&mut self) -> Result<BlockId> {
        let idx = self.free_bitmap.first_free_zero().ok_or_else(|| {
            log::warn!("block store exhausted: no free blocks");
            Error::OutOfSpace
        })?;
        self.free_bitmap.set(idx);
        self.flush_bitmap()?;
        Ok(BlockId(idx as u16))
    }

    // Fails if id is already set or out of range.
    pub fn request(&mut self, id: BlockId) -> Result<()> {
        Self::check_range(id)?;
        if self.free_bitmap.test(id.as_u32() as usize) {
            return Err(Error::InvalidArgument("block already allocated"));
        }
        self.free_bitmap.set(id.as_u32() as usize);
        self.flush_bitmap()
    }

    pub fn release(&mut self, id: BlockId) -> Result<()> {
        Self::check_range(id)?;
        if !self.free_bitmap.test(id.as_u32() as usize) {
            return Err(Error::Corruption("releasing a block that is already free"));
        }
        self.free_bitmap.reset(id.as_u32() as usize);
        self.flush_bitmap()
    }

    pub fn read(&mut self, id: BlockId, dst: &mut [u8; BLOCK_SIZE]) -> Result<()> {
        Self::check_range(id)?;
        self.read_raw(id, dst)
    }

    pub fn write(&mut self, id: BlockId, src: &[u8; BLOCK_SIZE]) -> Result<()> {
        Self::check_range(id)?;
        self.write_raw(id, src)
    }

    pub fn used_blocks(&self) -> u32 {
        self.free_bitmap.count_ones() as u32
    }

    pub fn free_blocks(&self) -> u32 {
        NUM_BLOCKS - self.used_blocks()
    }

    pub fn destroy(mut self) -> Result<()> {
        self.flush_bitmap()?;
        self.file.sync_all()?;
        Ok(())
    }
}
