use serde::{Deserialize, Serialize};
use tracing::debug;

use super::descriptor::RectangleDescriptor;
use super::error::LayoutError;
use crate::common::collections::HashMap;
use crate::sys::desktop::WorkspaceId;

/// User-forced position swaps, one table per workspace.
///
/// Tables are kept in workspace order: workspace `n` owns `tables[n]`, so
/// the host must mirror workspace creation and removal through
/// [`OverrideStore::append_workspace`] and [`OverrideStore::remove_workspace`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideStore {
    tables: Vec<HashMap<usize, RectangleDescriptor>>,
}

impl OverrideStore {
    pub fn with_workspaces(count: usize) -> Self {
        Self {
            tables: (0..count).map(|_| HashMap::default()).collect(),
        }
    }

    pub fn workspace_count(&self) -> usize { self.tables.len() }

    pub fn append_workspace(&mut self) -> WorkspaceId {
        self.tables.push(HashMap::default());
        WorkspaceId::new(self.tables.len() as u32 - 1)
    }

    /// Grows the store so `workspace` has a table. Used when the host creates
    /// a workspace on the engine's behalf.
    pub fn ensure_workspace(&mut self, workspace: WorkspaceId) {
        let needed = workspace.get() as usize + 1;
        if self.tables.len() < needed {
            self.tables.resize_with(needed, HashMap::default);
        }
    }

    /// Drops the table of `workspace`; every later workspace shifts down by one.
    pub fn remove_workspace(&mut self, workspace: WorkspaceId) -> Result<(), LayoutError> {
        let slot = self.slot(workspace)?;
        self.tables.remove(slot);
        debug!(%workspace, remaining = self.tables.len(), "removed override table");
        Ok(())
    }

    /// Records that `victim` and `replacement` swap places. Both directions
    /// are stored.
    pub fn create_override(
        &mut self,
        workspace: WorkspaceId,
        victim: RectangleDescriptor,
        replacement: RectangleDescriptor,
    ) -> Result<(), LayoutError> {
        let slot = self.slot(workspace)?;
        let table = &mut self.tables[slot];
        table.insert(victim.index, replacement);
        table.insert(replacement.index, victim);
        debug!(%workspace, victim = victim.index, replacement = replacement.index, "override created");
        Ok(())
    }

    pub fn replacement(&self, workspace: WorkspaceId, index: usize) -> Option<&RectangleDescriptor> {
        self.tables.get(workspace.get() as usize)?.get(&index)
    }

    /// Recorded swaps of `workspace` as `(a, b)` pairs with `a < b`, sorted.
    pub fn swaps(&self, workspace: WorkspaceId) -> Vec<(usize, usize)> {
        let Some(table) = self.tables.get(workspace.get() as usize) else {
            return Vec::new();
        };
        let mut swaps: Vec<_> = table
            .iter()
            .filter(|(index, replacement)| **index < replacement.index)
            .map(|(index, replacement)| (*index, replacement.index))
            .collect();
        swaps.sort_unstable();
        swaps
    }

    /// Like [`Self::swaps`], but clears the table: an override only survives
    /// a single recomputation.
    pub fn take_swaps(&mut self, workspace: WorkspaceId) -> Vec<(usize, usize)> {
        let swaps = self.swaps(workspace);
        if let Some(table) = self.tables.get_mut(workspace.get() as usize) {
            table.clear();
        }
        swaps
    }

    fn slot(&self, workspace: WorkspaceId) -> Result<usize, LayoutError> {
        let slot = workspace.get() as usize;
        if slot < self.tables.len() {
            Ok(slot)
        } else {
            Err(LayoutError::UnknownWorkspaceIndex(slot))
        }
    }
}
