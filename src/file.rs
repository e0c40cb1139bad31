// File I/O: logical-to-physical block mapping, read, write, and block
// release across the direct + single-indirect + double-indirect map.
// Same shape as the teacher's bmap/readi/writei/itrunc
// (kernel/src/fs/fs.rs), extended with a third, double-indirect level and
// taking &mut RawInode directly instead of a sleep-locked in-place inode
// since nothing here runs concurrently.

use crate::block_store::BlockStore;
use crate::error::{Error, Result};
use crate::layout::{
    BlockId, RawInode, BLOCK_SIZE, DIRECT_LOGICAL_BLOCKS, DOUBLE_INDIRECT_LOGICAL_BLOCKS,
    INDIRECT_LOGICAL_BLOCKS, POINTERS_PER_INDEX_BLOCK,
};

fn read_index_block(store: &mut BlockStore, id: BlockId) -> Result<[BlockId; POINTERS_PER_INDEX_BLOCK]> {
    let mut buf = [0u8; BLOCK_SIZE];
    store.read(id, &mut buf)?;
    let mut out = [BlockId::NONE; POINTERS_PER_INDEX_BLOCK];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = BlockId(u16::from_ne_bytes([buf[i * 2], buf[i * 2 + 1]]));
    }
    Ok(out)
}

fn write_index_block(store: &mut BlockStore, id: BlockId, entries: &[BlockId; POINTERS_PER_INDEX_BLOCK]) -> Result<()> {
    let mut buf = [0u8; BLOCK_SIZE];
    for (i, entry) in entries.iter().enumerate() {
        let bytes = entry.0.to_ne_bytes();
        buf[i * 2] = bytes[0];
        buf[i * 2 + 1] = bytes[1];
    }
    store.write(id, &buf)
}

// Returns None rather than propagating Error::OutOfSpace so callers can
// treat running out of blocks mid-mapping as "stop here".
fn allocate_zeroed(store: &mut BlockStore) -> Result<Option<BlockId>> {
    match store.allocate() {
        Ok(id) => {
            store.write(id, &[0u8; BLOCK_SIZE])?;
            Ok(Some(id))
        }
        Err(Error::OutOfSpace) => Ok(None),
        Err(e) => Err(e),
    }
}

// Maps logical block `logical` to a physical block id. When `allocate` is
// false (reads), an unmapped slot yields Ok(None): a hole, stop here. When
// true (writes), unmapped slots and index blocks are lazily created;
// Ok(None) then means the device ran out of space partway through.
pub fn map_block(store: &mut BlockStore, inode: &mut RawInode, logical: usize, allocate: bool) -> Result<Option<BlockId>> {
    if logical < DIRECT_LOGICAL_BLOCKS {
        let slot = &mut inode.direct_blocks[logical];
        if slot.is_none() {
            if !allocate {
                return Ok(None);
            }
            match allocate_zeroed(store)? {
                Some(id) => *slot = id,
                None => return Ok(None),
            }
        }
        return Ok(Some(*slot));
    }

    let logical = logical - DIRECT_LOGICAL_BLOCKS;
    if logical < INDIRECT_LOGICAL_BLOCKS {
        if inode.indirect_block.is_none() {
            if !allocate {
                return Ok(None);
            }
            match allocate_zeroed(store)? {
                Some(id) => inode.indirect_block = id,
                None => return Ok(None),
            }
        }
        let mut entries = read_index_block(store, inode.indirect_block)?;
        let entry = &mut entries[logical];
        if entry.is_none() {
            if !allocate {
                return Ok(None);
            }
            match allocate_zeroed(store)? {
                Some(id) => {
                    *entry = id;
                    write_index_block(store, inode.indirect_block, &entries)?;
                }
                None => return Ok(None),
            }
        }
        return Ok(Some(entries[logical]));
    }

    let logical = logical - INDIRECT_LOGICAL_BLOCKS;
    if logical < DOUBLE_INDIRECT_LOGICAL_BLOCKS {
        let outer_idx = logical / POINTERS_PER_INDEX_BLOCK;
        let inner_idx = logical % POINTERS_PER_INDEX_BLOCK;

        if inode.double_indirect_block.is_none() {
            if !allocate {
                return Ok(None);
            }
            match allocate_zeroed(store)? {
                Some(id) => inode.double_indirect_block = id,
                None => return Ok(None),
            }
        }
        let mut outer = read_index_block(store, inode.double_indirect_block)?;
        if outer[outer_idx].is_none() {
            if !allocate {
                return Ok(None);
            }
            match allocate_zeroed(store)? {
                Some(id) => {
                    outer[outer_idx] = id;
                    write_index_block(store, inode.double_indirect_block, &outer)?;
                }
                None => return Ok(None),
            }
        }

        let mut inner = read_index_block(store, outer[outer_idx])?;
        if inner[inner_idx].is_none() {
            if !allocate {
                return Ok(None);
            }
            match allocate_zeroed(store)? {
                Some(id) => {
                    inner[inner_idx] = id;
                    write_index_block(store, outer[outer_idx], &inner)?;
                }
                None => return Ok(None),
            }
        }
        return Ok(Some(inner[inner_idx]));
    }

    // logical >= MAX_LOGICAL_BLOCK: unrepresentable. Reads see this as a
    // hole; writes truncate here and report a short write.
    Ok(None)
}

pub fn read(store: &mut BlockStore, inode: &mut RawInode, position: i64, buf: &mut [u8]) -> Result<usize> {
    let available = (inode.file_size as i64 - position).max(0) as usize;
    let to_read = buf.len().min(available);

    let mut total = 0usize;
    let mut pos = position;
    while total < to_read {
        let logical = (pos as usize) / BLOCK_SIZE;
        let offset_in_block = (pos as usize) % BLOCK_SIZE;
        let chunk = (to_read - total).min(BLOCK_SIZE - offset_in_block);

        let block_id = match map_block(store, inode, logical, false)? {
            Some(id) => id,
            None => break,
        };

        let mut block_buf = [0u8; BLOCK_SIZE];
        store.read(block_id, &mut block_buf)?;
        buf[total..total + chunk].copy_from_slice(&block_buf[offset_in_block..offset_in_block + chunk]);

        total += chunk;
        pos += chunk as i64;
    }
    Ok(total)
}

// Returns fewer bytes than buf.len() only if the device ran out of space
// or the write reached the addressing limit.
pub fn write(store: &mut BlockStore, inode: &mut RawInode, position: i64, buf: &[u8]) -> Result<usize> {
    let mut total = 0usize;
    let mut pos = position;
    while total < buf.len() {
        let logical = (pos as usize) / BLOCK_SIZE;
        let offset_in_block = (pos as usize) % BLOCK_SIZE;
        let chunk = (buf.len() - total).min(BLOCK_SIZE - offset_in_block);

        let block_id = match map_block(store, inode, logical, true)? {
            Some(id) => id,
            None => break,
        };

        let mut block_buf = [0u8; BLOCK_SIZE];
        if offset_in_block != 0 || chunk != BLOCK_SIZE {
            store.read(block_id, &mut block_buf)?;
        }
        block_buf[offset_in_block..offset_in_block + chunk]
            .copy_from_slice(&buf[total..total + chunk]);
        store.write(block_id, &block_buf)?;

        total += chunk;
        pos += chunk as i64;
    }

    if pos > inode.file_size as i64 {
        inode.file_size = pos as i32;
    }
    Ok(total)
}

pub fn truncate_and_release(store: &mut BlockStore, inode: &mut RawInode) -> Result<()> {
    for slot in inode.direct_blocks.iter_mut() {
        if !slot.is_none() {
            store.release(*slot)?;
            *slot = BlockId::NONE;
        }
    }

    if !inode.indirect_block.is_none() {
        let entries = read_index_block(store, inode.indirect_block)?;
        for entry in entries {
            if !entry.is_none() {
                store.release(entry)?;
            }
        }
        store.release(inode.indirect_block)?;
        inode.indirect_block = BlockId::NONE;
    }

    if !inode.double_indirect_block.is_none() {
        let outer = read_index_block(store, inode.double_indirect_block)?;
        for outer_entry in outer {
            if outer_entry.is_none() {
                continue;
            }
            let inner = read_index_block(store, outer_entry)?;
            for inner_entry in inner {
                if !inner_entry.is_none() {
                    store.release(inner_entry)?;
                }
            }
            store.release(outer_entry)?;
        }
        store.release(inode.double_indirect_block)?;
        inode.double_indirect_block = BlockId::NONE;
    }

    inode.file_size = 0;
    Ok(())
}
