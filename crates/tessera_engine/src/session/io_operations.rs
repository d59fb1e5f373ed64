use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    export::{self, load_project, save_project},
    EngineError, ProjectSnapshot, Result,
};

use super::EditorSession;

impl EditorSession {
    /// Commits live edits and captures the whole session.
    pub fn snapshot(&mut self) -> Result<ProjectSnapshot> {
        self.ensure_idle()?;
        self.model.commit_current_edit();
        let mut snapshot = ProjectSnapshot::from_model(&self.model);
        snapshot.cell_size = self.cell_size;
        snapshot.brush_size = self.brush_size;
        snapshot.brush_color = self.color.color();
        snapshot.background = self.background;
        Ok(snapshot)
    }

    /// Replaces the session with `snapshot`. Nothing changes unless the snapshot is valid.
    pub fn restore(&mut self, snapshot: &ProjectSnapshot) -> Result<()> {
        self.ensure_idle()?;
        let model = snapshot.to_model()?;
        self.model = model;
        self.brush_size = snapshot.brush_size;
        self.color.set_from_color(snapshot.brush_color);
        self.background = snapshot.background;
        self.cell_size = snapshot.cell_size;
        self.clock.stop();
        self.clock.set_frame_rate(self.model.frame_rate());
        Ok(())
    }

    pub fn project_bytes(&mut self) -> Result<Vec<u8>> {
        let snapshot = self.snapshot()?;
        save_project(&snapshot)
    }

    pub fn load_project_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.ensure_idle()?;
        let snapshot = load_project(data)?;
        self.restore(&snapshot)
    }

    pub fn save_project(&mut self, path: &Path) -> Result<()> {
        let data = self.project_bytes()?;
        fs::write(path, data).map_err(|e| EngineError::write_file(path, e.to_string()))?;
        log::info!("saved project to {}", path.display());
        Ok(())
    }

    pub fn load_project(&mut self, path: &Path) -> Result<()> {
        self.ensure_idle()?;
        let data = fs::read(path)?;
        self.load_project_bytes(&data)?;
        log::info!("loaded project {}", path.display());
        Ok(())
    }

    pub fn export_png(&mut self, path: &Path) -> Result<()> {
        self.ensure_idle()?;
        self.model.commit_current_edit();
        export::export_png(&self.model, path, &self.export_options())
    }

    pub fn export_sequence(&mut self, dir: &Path) -> Result<Vec<PathBuf>> {
        self.ensure_idle()?;
        self.model.commit_current_edit();
        export::export_sequence(&self.model, dir, &self.export_options())
    }

    /// Returns the number of frames written.
    pub fn export_gif(&mut self, path: &Path) -> Result<usize> {
        self.ensure_idle()?;
        self.model.commit_current_edit();
        export::export_gif(&self.model, path, &self.export_options())
    }
}
