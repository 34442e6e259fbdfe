use crate::config::ACCESS_PASSPHRASE;
use crate::core::report::Report;
use crate::core::xlsx;
use crate::domain::catalog;
use crate::domain::model::{
    Artifact, Category, InstitutionKind, Selection, Session, Step,
};
use crate::domain::ports::{ActivityLog, Notifier};
use crate::utils::error::Result;
use chrono::Local;
use std::collections::BTreeMap;

pub const MSG_WRONG_PASSWORD: &str = "Contraseña incorrecta. Inténtelo de nuevo.";
pub const MSG_INCOMPLETE_SELECTION: &str =
    "Debe completar todas las selecciones antes de continuar.";
pub const MSG_UNIT_MISMATCH: &str =
    "La unidad seleccionada no pertenece a la institución elegida.";
pub const MSG_INVALID_EVENT: &str = "Acción no disponible en este paso.";

/// One user interaction, as handed to the controller by the front-end.
#[derive(Debug, Clone)]
pub enum WizardEvent {
    SubmitPassword(String),
    Acknowledge,
    SubmitSelection {
        category: Option<Category>,
        institution: Option<InstitutionKind>,
        unit: Option<String>,
    },
    ConfirmSelection,
    ReviseSelection,
    SubmitCounts(BTreeMap<String, u32>),
    ConfirmCounts,
    ReviseCounts,
    Close,
}

/// Controller answer for one event. Gate failures come back as `Rejected` with
/// a user-facing message; they are not errors and the step does not move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Advanced,
    Rejected(String),
    Closed,
}

/// The step state machine. Owns the session, enforces the ordered progression
/// through the seven steps, and performs the finalization side effect exactly
/// once per entry into FINALIZE.
pub struct Wizard<N: Notifier, L: ActivityLog> {
    session: Session,
    notifier: N,
    log: L,
}

impl<N: Notifier, L: ActivityLog> Wizard<N, L> {
    pub fn new(notifier: N, log: L) -> Self {
        Self {
            session: Session::new(),
            notifier,
            log,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn step(&self) -> &Step {
        &self.session.step
    }

    /// Counts for every specialty in the active category, in catalog order,
    /// defaulting to 0. Empty when no selection has been made yet.
    pub fn active_counts(&self) -> Vec<(&'static str, u32)> {
        let Some(selection) = &self.session.selection else {
            return Vec::new();
        };
        catalog::specialties_for(selection.category)
            .into_iter()
            .map(|specialty| {
                (
                    specialty,
                    self.session.entries.get(specialty).copied().unwrap_or(0),
                )
            })
            .collect()
    }

    /// Process one event against the current step. Only a workbook
    /// serialization failure during finalization is an `Err`; everything else
    /// resolves to a `Feedback`.
    pub async fn apply(&mut self, event: WizardEvent) -> Result<Feedback> {
        match self.session.step {
            Step::Login => Ok(self.on_login(event)),
            Step::Welcome => Ok(self.on_welcome(event)),
            Step::Select => Ok(self.on_select(event)),
            Step::ConfirmSelection => Ok(self.on_confirm_selection(event)),
            Step::EnterData => Ok(self.on_enter_data(event)),
            Step::Validate => self.on_validate(event).await,
            Step::Finalize { .. } => Ok(self.on_finalize(event)),
        }
    }

    fn on_login(&mut self, event: WizardEvent) -> Feedback {
        match event {
            WizardEvent::SubmitPassword(password) => {
                if password == ACCESS_PASSPHRASE {
                    self.session.authenticated = true;
                    self.session.step = Step::Welcome;
                    self.note("Usuario autenticado correctamente");
                    Feedback::Advanced
                } else {
                    self.note("Intento de login fallido");
                    Feedback::Rejected(MSG_WRONG_PASSWORD.to_string())
                }
            }
            _ => Feedback::Rejected(MSG_INVALID_EVENT.to_string()),
        }
    }

    fn on_welcome(&mut self, event: WizardEvent) -> Feedback {
        match event {
            WizardEvent::Acknowledge => {
                self.session.step = Step::Select;
                self.note("Aplicativo iniciado");
                Feedback::Advanced
            }
            _ => Feedback::Rejected(MSG_INVALID_EVENT.to_string()),
        }
    }

    fn on_select(&mut self, event: WizardEvent) -> Feedback {
        match event {
            WizardEvent::SubmitSelection {
                category,
                institution,
                unit,
            } => {
                let (Some(category), Some(institution), Some(unit)) =
                    (category, institution, unit)
                else {
                    return Feedback::Rejected(MSG_INCOMPLETE_SELECTION.to_string());
                };

                if !catalog::is_unit_of(institution, &unit) {
                    return Feedback::Rejected(MSG_UNIT_MISMATCH.to_string());
                }

                self.note(&format!(
                    "Criterios seleccionados: {}, {}, {}",
                    category, institution, unit
                ));
                self.session.selection = Some(Selection {
                    category,
                    institution,
                    unit,
                });
                self.session.step = Step::ConfirmSelection;
                Feedback::Advanced
            }
            _ => Feedback::Rejected(MSG_INVALID_EVENT.to_string()),
        }
    }

    fn on_confirm_selection(&mut self, event: WizardEvent) -> Feedback {
        match event {
            WizardEvent::ConfirmSelection => {
                self.session.step = Step::EnterData;
                self.note("Selecciones confirmadas");
                Feedback::Advanced
            }
            // Selection stays populated so SELECT re-renders pre-filled.
            WizardEvent::ReviseSelection => {
                self.session.step = Step::Select;
                self.note("Revisión de selecciones solicitada");
                Feedback::Advanced
            }
            _ => Feedback::Rejected(MSG_INVALID_EVENT.to_string()),
        }
    }

    fn on_enter_data(&mut self, event: WizardEvent) -> Feedback {
        match event {
            WizardEvent::SubmitCounts(counts) => {
                let Some(selection) = &self.session.selection else {
                    return Feedback::Rejected(MSG_INVALID_EVENT.to_string());
                };
                let active = catalog::specialties_for(selection.category);

                if let Some(unknown) = counts.keys().find(|key| !active.contains(&key.as_str())) {
                    return Feedback::Rejected(format!("Especialidad desconocida: {}", unknown));
                }

                // Every active specialty gets a value; omitted ones default to
                // 0. Entries from a previously active category are kept so a
                // later revision pre-populates, but they never reach a report.
                for specialty in active {
                    let value = counts.get(specialty).copied().unwrap_or(0);
                    self.session.entries.insert(specialty.to_string(), value);
                }

                self.session.step = Step::Validate;
                self.note("Datos introducidos correctamente");
                Feedback::Advanced
            }
            _ => Feedback::Rejected(MSG_INVALID_EVENT.to_string()),
        }
    }

    async fn on_validate(&mut self, event: WizardEvent) -> Result<Feedback> {
        match event {
            WizardEvent::ConfirmCounts => self.enter_finalize().await,
            WizardEvent::ReviseCounts => {
                self.session.step = Step::EnterData;
                self.note("Revisión de datos solicitada");
                Ok(Feedback::Advanced)
            }
            _ => Ok(Feedback::Rejected(MSG_INVALID_EVENT.to_string())),
        }
    }

    fn on_finalize(&mut self, event: WizardEvent) -> Feedback {
        match event {
            WizardEvent::Close => {
                self.note("Aplicativo cerrado");
                self.session.reset();
                Feedback::Closed
            }
            // Re-rendering or replaying a confirm never re-enters the send:
            // the outcome already lives in the Finalize variant.
            _ => Feedback::Rejected(MSG_INVALID_EVENT.to_string()),
        }
    }

    /// Runs once per entry into FINALIZE: build the report, serialize the
    /// artifact (the only fatal path), dispatch it, and store both in the
    /// state variant.
    async fn enter_finalize(&mut self) -> Result<Feedback> {
        let Some(selection) = self.session.selection.clone() else {
            return Ok(Feedback::Rejected(MSG_INVALID_EVENT.to_string()));
        };

        self.note("Datos confirmados para procesamiento");

        let report = Report::build(selection.category, &selection.unit, &self.session.entries);
        let bytes = xlsx::workbook(&report)?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let artifact = Artifact {
            filename: format!("capacidad_docente_{}_{}.xlsx", selection.unit, stamp),
            bytes,
        };

        let dispatch = self.notifier.dispatch(&artifact, &selection.unit).await;
        self.session.step = Step::Finalize { dispatch, artifact };
        Ok(Feedback::Advanced)
    }

    fn note(&self, accion: &str) {
        if let Err(e) = self.log.record(accion) {
            tracing::warn!("Activity log write failed: {}", e);
        }
    }
}
