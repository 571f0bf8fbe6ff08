use super::Context;
use crate::{HandleKind, PathHandle, VgError, VgResult};
use glam::Vec2;
use quill_geometry::{MatrixMode, Path, PathDescriptor};

impl Context {
    pub fn create_path(&mut self, descriptor: &PathDescriptor) -> VgResult<PathHandle> {
        let path = Path::new(descriptor)?;
        let handle = PathHandle(self.paths.push(path));
        tracing::debug!(
            path = handle.to_bits(),
            capabilities = ?descriptor.capabilities,
            "created path"
        );
        Ok(handle)
    }

    pub fn destroy_path(&mut self, handle: PathHandle) -> VgResult<()> {
        self.paths
            .remove(handle.0)
            .ok_or(VgError::InvalidHandle(HandleKind::Path))?;
        self.cache.remove(handle);
        tracing::debug!(path = handle.to_bits(), "destroyed path");
        Ok(())
    }

    pub fn path(&self, handle: PathHandle) -> VgResult<&Path> {
        self.paths
            .get(handle.0)
            .ok_or(VgError::InvalidHandle(HandleKind::Path))
    }

    /// Direct access for the shape helpers and typed segment appends.
    ///
    /// Capability checks and generation bumps are enforced by [`Path`]
    /// itself, so cached geometry stays consistent.
    pub fn path_mut(&mut self, handle: PathHandle) -> VgResult<&mut Path> {
        self.paths
            .get_mut(handle.0)
            .ok_or(VgError::InvalidHandle(HandleKind::Path))
    }

    /// Append encoded segments. Atomic: on failure the path is unchanged.
    pub fn append_path_data(
        &mut self,
        handle: PathHandle,
        tags: &[u8],
        operands: &[f32],
    ) -> VgResult<()> {
        Ok(self.path_mut(handle)?.append(tags, operands)?)
    }

    pub fn clear_path(&mut self, handle: PathHandle) -> VgResult<()> {
        Ok(self.path_mut(handle)?.clear()?)
    }

    /// Overwrite the operands of `count` segments starting at segment `start`.
    pub fn modify_path_coords(
        &mut self,
        handle: PathHandle,
        start: usize,
        count: usize,
        operands: &[f32],
    ) -> VgResult<()> {
        Ok(self
            .path_mut(handle)?
            .modify_operands(start, count, operands)?)
    }

    /// Append `src` mapped through the current path-user-to-surface matrix to
    /// `dst`. `dst` and `src` may be the same path.
    pub fn transform_path(&mut self, dst: PathHandle, src: PathHandle) -> VgResult<()> {
        let matrix = self.transforms.matrix(MatrixMode::PathUserToSurface);
        let resolved = self.path(src)?.resolve();
        self.path_mut(dst)?.append_transformed(&resolved, &matrix)?;
        tracing::trace!(dst = dst.to_bits(), src = src.to_bits(), "transformed path");
        Ok(())
    }

    /// Conservative user-space bounds, `None` for an empty path.
    pub fn path_bounds(&self, handle: PathHandle) -> VgResult<Option<(Vec2, Vec2)>> {
        Ok(self.path(handle)?.bounds())
    }

    /// Bounds after mapping through the current path-user-to-surface matrix.
    pub fn path_transformed_bounds(
        &self,
        handle: PathHandle,
    ) -> VgResult<Option<(Vec2, Vec2)>> {
        let matrix = self.transforms.matrix(MatrixMode::PathUserToSurface);
        Ok(self.path(handle)?.resolve().transformed(&matrix).bounds())
    }
}
