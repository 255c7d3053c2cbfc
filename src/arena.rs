//! Generation-checked particle storage.
//!
//! Constraints never borrow particles. They hold a [`ParticleHandle`], and
//! every lookup compares the handle's generation with the slot's, so a
//! handle that outlived its particle fails with
//! [`PhysicsError::StaleHandle`] instead of reading a reused slot.

use crate::error::PhysicsError;
use crate::particle::Particle;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// Identifies one particle in a [`ParticleArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleHandle {
    index: u32,
    generation: u32,
}

impl ParticleHandle {
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Clone, Debug)]
struct Slot<V: Vec> {
    generation: u32,
    particle: Option<Particle<V>>,
}

/// Slot storage for particles. Freed slots are reused, with a bumped
/// generation, by later inserts.
#[derive(Clone, Debug)]
pub struct ParticleArena<V: Vec> {
    slots: AllocVec<Slot<V>>,
    free: AllocVec<u32>,
    len: usize,
}

impl<V: Vec> ParticleArena<V> {
    pub fn new() -> Self {
        ParticleArena {
            slots: AllocVec::new(),
            free: AllocVec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, particle: Particle<V>) -> ParticleHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.particle = Some(particle);
            return ParticleHandle { index, generation: slot.generation };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, particle: Some(particle) });
        ParticleHandle { index, generation: 0 }
    }

    pub fn contains(&self, handle: ParticleHandle) -> bool {
        self.get(handle).is_ok()
    }

    pub fn get(&self, handle: ParticleHandle) -> Result<&Particle<V>, PhysicsError> {
        match self.slots.get(handle.index()) {
            Some(Slot { generation, particle: Some(p) }) if *generation == handle.generation => Ok(p),
            _ => Err(PhysicsError::StaleHandle(handle)),
        }
    }

    pub fn get_mut(&mut self, handle: ParticleHandle) -> Result<&mut Particle<V>, PhysicsError> {
        match self.slots.get_mut(handle.index()) {
            Some(Slot { generation, particle: Some(p) }) if *generation == handle.generation => Ok(p),
            _ => Err(PhysicsError::StaleHandle(handle)),
        }
    }

    /// Mutable access to two distinct particles at once.
    ///
    /// Passing the same handle twice is reported as stale for the second
    /// argument; a spring from a particle to itself has no meaning.
    pub fn pair_mut(
        &mut self,
        a: ParticleHandle,
        b: ParticleHandle,
    ) -> Result<(&mut Particle<V>, &mut Particle<V>), PhysicsError> {
        self.get(a)?;
        self.get(b)?;
        if a.index == b.index {
            return Err(PhysicsError::StaleHandle(b));
        }
        let (lo, hi, swapped) = if a.index < b.index {
            (a.index(), b.index(), false)
        } else {
            (b.index(), a.index(), true)
        };
        let (head, tail) = self.slots.split_at_mut(hi);
        match (head[lo].particle.as_mut(), tail[0].particle.as_mut()) {
            (Some(first), Some(second)) => {
                if swapped {
                    Ok((second, first))
                } else {
                    Ok((first, second))
                }
            }
            _ => Err(PhysicsError::StaleHandle(a)),
        }
    }

    /// Release one particle. Its handle, and every copy of it, goes stale.
    pub fn remove(&mut self, handle: ParticleHandle) -> Result<Particle<V>, PhysicsError> {
        self.get(handle)?;
        let slot = &mut self.slots[handle.index()];
        let particle = slot.particle.take().ok_or(PhysicsError::StaleHandle(handle))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Ok(particle)
    }

    /// Release every particle. Calling this on an empty arena is a no-op.
    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.particle.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index as u32);
        }
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live particles in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticleHandle, &Particle<V>)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.particle.as_ref().map(|p| {
                (ParticleHandle { index: index as u32, generation: slot.generation }, p)
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle<V>> {
        self.slots.iter_mut().filter_map(|slot| slot.particle.as_mut())
    }
}

impl<V: Vec> Default for ParticleArena<V> {
    fn default() -> Self {
        Self::new()
    }
}
