use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    FormacionProfesional,
    Universitarios,
    Todos,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::FormacionProfesional => "Formación Profesional",
            Category::Universitarios => "Universitarios",
            Category::Todos => "Todos",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstitutionKind {
    Hospital,
    Gerencia,
}

impl InstitutionKind {
    pub fn label(&self) -> &'static str {
        match self {
            InstitutionKind::Hospital => "Hospital",
            InstitutionKind::Gerencia => "Gerencia",
        }
    }
}

impl fmt::Display for InstitutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three SELECT-step choices once all of them are concrete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub category: Category,
    pub institution: InstitutionKind,
    pub unit: String,
}

/// Result of one notifier call, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub sent: bool,
    pub message: String,
}

/// In-memory spreadsheet blob plus its timestamped filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Wizard position. `Finalize` carries the send outcome and the artifact as its
/// own data: a populated variant is the proof the side effect already ran, so
/// re-rendering the step can never re-send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Login,
    Welcome,
    Select,
    ConfirmSelection,
    EnterData,
    Validate,
    Finalize {
        dispatch: DispatchOutcome,
        artifact: Artifact,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Login => "LOGIN",
            Step::Welcome => "WELCOME",
            Step::Select => "SELECT",
            Step::ConfirmSelection => "CONFIRM_SELECTION",
            Step::EnterData => "ENTER_DATA",
            Step::Validate => "VALIDATE",
            Step::Finalize { .. } => "FINALIZE",
        }
    }
}

/// Transient per-session state. Mutated exclusively by the wizard controller,
/// reset to defaults on explicit close.
#[derive(Debug, Clone)]
pub struct Session {
    pub authenticated: bool,
    pub step: Step,
    pub selection: Option<Selection>,
    pub entries: BTreeMap<String, u32>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            authenticated: false,
            step: Step::Login,
            selection: None,
            entries: BTreeMap::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Session::new();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
