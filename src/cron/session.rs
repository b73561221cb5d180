//! One editing session: seven field editors around one assembler.
//!
//! Every edit runs in a fixed order: the field editor reduces the action and
//! emits its field string, the assembler stores it and reconciles the
//! date/day-of-week pair, and finally every editor whose slot no longer
//! matches its own projection is re-synced from the working list.

use super::assembler::{EditMode, Emission, ExpressionAssembler};
use super::codec::FieldMode;
use super::disabled::DisableMap;
use super::editor::{FieldAction, FieldEditor};
use super::CronKey;

#[derive(Clone, Debug, Default)]
pub struct SessionOptions {
    pub mode: EditMode,
    pub generator_disabled: DisableMap,
    /// Whole editor locked (no edits, no confirm).
    pub locked: bool,
}

#[derive(Clone, Debug)]
pub struct CronSession {
    assembler: ExpressionAssembler,
    editors: Vec<FieldEditor>,
    options: SessionOptions,
}

impl Default for CronSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl CronSession {
    pub fn new(options: SessionOptions) -> Self {
        let mut session = Self {
            assembler: ExpressionAssembler::new(options.mode),
            editors: CronKey::ALL.iter().map(|k| FieldEditor::new(*k)).collect(),
            options,
        };
        session.resync();
        session
    }

    pub fn mode(&self) -> EditMode {
        self.assembler.mode()
    }

    pub fn editor(&self, key: CronKey) -> &FieldEditor {
        &self.editors[key.index()]
    }

    pub fn field_value(&self, key: CronKey) -> Option<&str> {
        self.assembler.value(key.index())
    }

    pub fn expression(&self) -> Option<String> {
        self.assembler.expression()
    }

    pub fn is_locked(&self) -> bool {
        self.options.locked
    }

    pub fn field_locked(&self, key: CronKey) -> bool {
        self.options.locked || self.options.generator_disabled.field_disabled(key)
    }

    pub fn mode_locked(&self, key: CronKey, mode: FieldMode) -> bool {
        self.options.locked || self.options.generator_disabled.mode_disabled(key, mode)
    }

    /// External whole-expression input.
    pub fn set_whole_expression(&mut self, value: Option<&str>) -> Vec<Emission> {
        let out = self.assembler.ingest(value);
        self.resync();
        out.into_iter().collect()
    }

    /// External raw field input, bypassing the field editor.
    pub fn edit_field(&mut self, index: usize, value: Option<&str>) -> Vec<Emission> {
        let out = self.assembler.apply_field_edit(index, value);
        self.resync();
        out.into_iter().collect()
    }

    /// Route a structured edit through the field's editor.
    pub fn edit(&mut self, key: CronKey, action: FieldAction) -> Vec<Emission> {
        if self.field_locked(key) {
            log::debug!("{key:?}: field locked, edit ignored");
            return Vec::new();
        }
        let target = match &action {
            FieldAction::SelectMode(mode) | FieldAction::EditParam { mode, .. } => *mode,
            FieldAction::SetList(_) | FieldAction::ToggleListItem(_) => FieldMode::List,
        };
        if self.mode_locked(key, target) {
            log::debug!("{key:?}: mode {target:?} locked, edit ignored");
            return Vec::new();
        }
        match self.editors[key.index()].apply(action) {
            Some(field) => self.edit_field(key.index(), Some(&field)),
            None => Vec::new(),
        }
    }

    pub fn confirm(&mut self) -> Vec<Emission> {
        if self.options.locked {
            return Vec::new();
        }
        self.assembler.confirm()
    }

    fn resync(&mut self) {
        for (index, editor) in self.editors.iter_mut().enumerate() {
            let slot = self.assembler.value(index);
            if editor.project().as_deref() != slot {
                editor.sync(slot);
            }
        }
    }
}
