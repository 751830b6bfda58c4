use std::collections::HashMap;

use anyhow::{bail, ensure, Result};

/// Declares one uniform block of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformSpec {
    pub name: String,
    /// Block size in bytes; a non-zero multiple of 16.
    pub size: u64,
    pub visibility: wgpu::ShaderStages,
}

impl UniformSpec {
    pub fn new(name: impl Into<String>, size: u64, visibility: wgpu::ShaderStages) -> Self {
        Self {
            name: name.into(),
            size,
            visibility,
        }
    }

    /// Block sized for the `Pod` type `T`.
    pub fn of<T: bytemuck::Pod>(name: impl Into<String>, visibility: wgpu::ShaderStages) -> Self {
        Self::new(name, std::mem::size_of::<T>() as u64, visibility)
    }
}

/// Stable handle to a registered uniform block.
///
/// The index doubles as the block's binding number in bind group 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformHandle(u32);

impl UniformHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn binding(self) -> u32 {
        self.0
    }
}

/// Metadata for a registered block.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformSlot {
    pub name: String,
    pub size: u64,
    pub visibility: wgpu::ShaderStages,
}

/// Name → handle resolution done once at setup.
///
/// Per-frame code holds [`UniformHandle`]s and never looks names up again.
#[derive(Debug, Default)]
pub struct UniformRegistry {
    slots: Vec<UniformSlot>,
    by_name: HashMap<String, UniformHandle>,
}

impl UniformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from specs, in order.
    pub fn from_specs(specs: &[UniformSpec]) -> Result<Self> {
        let mut registry = Self::new();
        for spec in specs {
            registry.register(spec.clone())?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, spec: UniformSpec) -> Result<UniformHandle> {
        ensure!(!spec.name.is_empty(), "uniform block name is empty");
        ensure!(
            spec.size > 0 && spec.size % 16 == 0,
            "uniform block `{}` has size {} (must be a non-zero multiple of 16)",
            spec.name,
            spec.size
        );
        if self.by_name.contains_key(&spec.name) {
            bail!("uniform block `{}` registered twice", spec.name);
        }

        let handle = UniformHandle(self.slots.len() as u32);
        self.by_name.insert(spec.name.clone(), handle);
        self.slots.push(UniformSlot {
            name: spec.name,
            size: spec.size,
            visibility: spec.visibility,
        });
        Ok(handle)
    }

    pub fn handle(&self, name: &str) -> Option<UniformHandle> {
        self.by_name.get(name).copied()
    }

    pub fn slot(&self, handle: UniformHandle) -> Option<&UniformSlot> {
        self.slots.get(handle.index())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UniformHandle, &UniformSlot)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (UniformHandle(i as u32), slot))
    }

    /// Checks that `bytes` is a valid write for `handle`.
    pub fn check_write(&self, handle: UniformHandle, bytes: usize) -> Result<&UniformSlot> {
        let Some(slot) = self.slot(handle) else {
            bail!("uniform handle {} out of range", handle.0);
        };
        ensure!(
            bytes as u64 == slot.size,
            "uniform block `{}` expects {} bytes, got {}",
            slot.name,
            slot.size,
            bytes
        );
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, size: u64) -> UniformSpec {
        UniformSpec::new(name, size, wgpu::ShaderStages::VERTEX)
    }

    #[test]
    fn handles_are_dense_and_stable() {
        let reg = UniformRegistry::from_specs(&[spec("tint", 16), spec("transform", 192)]).unwrap();
        assert_eq!(reg.len(), 2);

        let tint = reg.handle("tint").unwrap();
        let transform = reg.handle("transform").unwrap();
        assert_eq!(tint.binding(), 0);
        assert_eq!(transform.binding(), 1);
        assert_eq!(reg.handle("tint"), Some(tint));
        assert_eq!(reg.slot(transform).unwrap().size, 192);
    }

    #[test]
    fn unknown_name_has_no_handle() {
        let reg = UniformRegistry::from_specs(&[spec("tint", 16)]).unwrap();
        assert!(reg.handle("triangleColor").is_none());
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = UniformRegistry::from_specs(&[spec("tint", 16), spec("tint", 32)]).unwrap_err();
        assert!(err.to_string().contains("registered twice"));
    }

    #[test]
    fn misaligned_size_rejected() {
        assert!(UniformRegistry::from_specs(&[spec("tint", 12)]).is_err());
        assert!(UniformRegistry::from_specs(&[spec("tint", 0)]).is_err());
        assert!(UniformRegistry::from_specs(&[spec("", 16)]).is_err());
    }

    #[test]
    fn write_size_is_checked() {
        let reg = UniformRegistry::from_specs(&[spec("tint", 16)]).unwrap();
        let tint = reg.handle("tint").unwrap();
        assert!(reg.check_write(tint, 16).is_ok());
        assert!(reg.check_write(tint, 8).is_err());
        assert!(reg.check_write(UniformHandle(5), 16).is_err());
    }

    #[test]
    fn spec_sized_from_type() {
        let s = UniformSpec::of::<[f32; 4]>("tint", wgpu::ShaderStages::FRAGMENT);
        assert_eq!(s.size, 16);
    }

    #[test]
    fn iter_in_binding_order() {
        let reg = UniformRegistry::from_specs(&[spec("a", 16), spec("b", 32)]).unwrap();
        let names: Vec<&str> = reg.iter().map(|(_, s)| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
