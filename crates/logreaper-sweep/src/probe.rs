//! Volume free-space probe backed by OS disk enumeration

use logreaper_domain::SpaceProbe;
use std::path::Path;
use sysinfo::Disks;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// [`SpaceProbe`] implementation over the OS mounted-volume list
///
/// Resolves the volume containing a path by longest matching mount-point
/// prefix, so nested mounts (`/` vs `/var`) resolve to the deepest volume
/// actually holding the path. Returns `None` when no mount point contains
/// the path; callers treat that as "threshold not crossed".
///
/// The disk list is refreshed on every query: the sweeper re-checks free
/// space per candidate, and space reclaimed by earlier deletions in the
/// same cycle must be visible to later checks.
#[derive(Debug, Default)]
pub struct VolumeProbe;

impl VolumeProbe {
    /// Create a new probe
    pub fn new() -> Self {
        Self
    }
}

impl SpaceProbe for VolumeProbe {
    fn free_space_mb(&self, path: &Path) -> Option<u64> {
        // Canonicalize so relative or symlinked paths compare against
        // absolute mount points; an unresolvable path stays as given and
        // simply matches no volume.
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let disks = Disks::new_with_refreshed_list();
        let volume = disks
            .list()
            .iter()
            .filter(|disk| path.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().as_os_str().len())?;

        Some(volume.available_space() / BYTES_PER_MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_volume_for_temp_dir() {
        let probe = VolumeProbe::new();
        // The temp dir always lives on some mounted volume.
        let free = probe.free_space_mb(&std::env::temp_dir());
        assert!(free.is_some());
    }

    #[test]
    fn test_unmatched_path_is_none() {
        let probe = VolumeProbe::new();
        // A relative path that does not exist cannot be canonicalized and
        // matches no absolute mount point.
        assert_eq!(probe.free_space_mb(Path::new("no/such/volume")), None);
    }
}
