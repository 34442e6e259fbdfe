//! Interactive terminal front-end. Renders the current step, turns user input
//! into wizard events, and offers the finished artifact for manual retrieval.
//! All gating decisions live in the controller; this layer only asks and shows.

use crate::config::cli::LocalStorage;
use crate::config::FALLBACK_EMAIL;
use crate::core::wizard::{Feedback, Wizard, WizardEvent};
use crate::domain::catalog;
use crate::domain::model::{Category, InstitutionKind, Step};
use crate::domain::ports::{ActivityLog, Notifier, Storage};
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::io::{self, Write};

const BANNER: &str = "CAPACIDAD DOCENTE CENTROS SANITARIOS del SCS";

const WELCOME_INSTRUCTIONS: &str = "\
📋 Instrucciones de uso:
  1. Seleccione el tipo de capacidad docente que desea registrar
  2. Elija su institución (Hospital o Gerencia)
  3. Seleccione su unidad específica
  4. Introduzca los datos en la tabla correspondiente
  5. Confirme la información antes del envío
  6. Descargue el archivo generado automáticamente

⚠️  Importante: Todos los campos son obligatorios y los datos se enviarán
automáticamente por email.";

const CATEGORIES: [Category; 3] = [
    Category::FormacionProfesional,
    Category::Universitarios,
    Category::Todos,
];

const INSTITUTIONS: [InstitutionKind; 2] = [InstitutionKind::Hospital, InstitutionKind::Gerencia];

pub struct Console<N: Notifier, L: ActivityLog> {
    wizard: Wizard<N, L>,
    storage: LocalStorage,
}

impl<N: Notifier, L: ActivityLog> Console<N, L> {
    pub fn new(wizard: Wizard<N, L>, storage: LocalStorage) -> Self {
        Self { wizard, storage }
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            let event = match self.wizard.step() {
                Step::Login => self.login_event(),
                Step::Welcome => self.welcome_event(),
                Step::Select => self.select_event(),
                Step::ConfirmSelection => self.confirm_selection_event(),
                Step::EnterData => self.enter_data_event(),
                Step::Validate => self.validate_event(),
                Step::Finalize { .. } => self.finalize_event().await?,
            };

            let Some(event) = event else {
                break;
            };

            match self.wizard.apply(event).await? {
                Feedback::Advanced => {}
                Feedback::Rejected(message) => println!("❌ {}\n", message),
                Feedback::Closed => println!("Sesión finalizada.\n"),
            }
        }

        Ok(())
    }

    fn login_event(&self) -> Option<WizardEvent> {
        println!("\n=== {} ===\n", BANNER);
        println!("🔐 Acceso al Sistema (escriba 'salir' para terminar)\n");

        let input = self.prompt("Contraseña de acceso: ")?;
        if input == "salir" {
            return None;
        }
        Some(WizardEvent::SubmitPassword(input))
    }

    fn welcome_event(&self) -> Option<WizardEvent> {
        println!("\n🎯 Bienvenido a la aplicación");
        println!("{}\n", BANNER);
        println!("{}\n", WELCOME_INSTRUCTIONS);

        self.prompt("Pulse Intro para iniciar el aplicativo... ")?;
        Some(WizardEvent::Acknowledge)
    }

    fn select_event(&self) -> Option<WizardEvent> {
        println!("\n🎯 Configuración de Criterios\n");

        println!("Seleccione si tiene capacidad docente para Formación Profesional, Universitarios o ambos:");
        let category = self.choose(&CATEGORIES.map(|c| c.label()))?;
        let category = category.map(|i| CATEGORIES[i]);

        println!("Seleccione institución:");
        let institution = self.choose(&INSTITUTIONS.map(|i| i.label()))?;
        let institution = institution.map(|i| INSTITUTIONS[i]);

        // No institution chosen yet: the unit list stays placeholder-only.
        let unit = match institution {
            Some(kind) => {
                println!("Seleccione su unidad:");
                let units = catalog::units_for(kind);
                self.choose(units)?.map(|i| units[i].to_string())
            }
            None => {
                println!("(Seleccione primero una institución para ver sus unidades.)");
                None
            }
        };

        Some(WizardEvent::SubmitSelection {
            category,
            institution,
            unit,
        })
    }

    fn confirm_selection_event(&self) -> Option<WizardEvent> {
        let Some(selection) = &self.wizard.session().selection else {
            return Some(WizardEvent::ReviseSelection);
        };

        println!("\n✅ Confirmación de Selecciones\n");
        println!("Tipo de capacidad docente: {}", selection.category);
        println!("Institución: {}", selection.institution);
        println!("Unidad: {}\n", selection.unit);

        loop {
            let input = self.prompt("¿Es correcta la actual selección? (s = sí / r = revisar): ")?;
            match input.as_str() {
                "s" | "S" => return Some(WizardEvent::ConfirmSelection),
                "r" | "R" => return Some(WizardEvent::ReviseSelection),
                _ => println!("Responda 's' o 'r'."),
            }
        }
    }

    fn enter_data_event(&self) -> Option<WizardEvent> {
        println!("\n📊 Introducción de Datos");
        if let Some(selection) = &self.wizard.session().selection {
            println!("Unidad: {}\n", selection.unit);
        }
        println!("Introduzca el número de personas para cada especialidad (Intro conserva el valor actual):\n");

        let mut counts = BTreeMap::new();
        for (specialty, current) in self.wizard.active_counts() {
            let value = loop {
                let input = self.prompt(&format!("  {} [{}]: ", specialty, current))?;
                if input.is_empty() {
                    break current;
                }
                match input.parse::<u32>() {
                    Ok(value) => break value,
                    Err(_) => println!("  Introduzca un número entero no negativo."),
                }
            };
            counts.insert(specialty.to_string(), value);
        }

        Some(WizardEvent::SubmitCounts(counts))
    }

    fn validate_event(&self) -> Option<WizardEvent> {
        println!("\n🔍 Validación de Datos\n");
        println!("Usted ha introducido la siguiente información:\n");

        let counts = self.wizard.active_counts();
        let total: u64 = counts.iter().map(|(_, count)| u64::from(*count)).sum();
        for (specialty, count) in &counts {
            println!("  {:<70} {}", specialty, count);
        }
        println!("  {:<70} {}\n", "TOTAL", total);

        loop {
            let input = self.prompt("¿Desea confirmar estos valores? (c = confirmar / r = revisar): ")?;
            match input.as_str() {
                "c" | "C" => return Some(WizardEvent::ConfirmCounts),
                "r" | "R" => return Some(WizardEvent::ReviseCounts),
                _ => println!("Responda 'c' o 'r'."),
            }
        }
    }

    async fn finalize_event(&self) -> Result<Option<WizardEvent>> {
        let Step::Finalize { dispatch, artifact } = self.wizard.step() else {
            return Ok(Some(WizardEvent::Close));
        };
        let dispatch = dispatch.clone();
        let artifact = artifact.clone();

        println!("\n📁 Generación y Envío del Archivo\n");

        if dispatch.sent {
            println!("✅ {}", dispatch.message);
        } else {
            println!("❌ {}", dispatch.message);
            println!(
                "⚠️  En caso de error de envío, el archivo descargado debe enviarse por mail a {}",
                FALLBACK_EMAIL
            );
        }

        match self
            .storage
            .write_file(&artifact.filename, &artifact.bytes)
            .await
        {
            Ok(()) => println!(
                "📥 Archivo disponible en: {}",
                self.storage.full_path(&artifact.filename).display()
            ),
            Err(e) => println!("❌ No se pudo guardar el archivo localmente: {}", e),
        }

        if self.prompt("\nPulse Intro para cerrar el aplicativo... ").is_none() {
            return Ok(None);
        }
        Ok(Some(WizardEvent::Close))
    }

    /// Numbered menu; Intro alone leaves the field unselected.
    fn choose(&self, options: &[&str]) -> Option<Option<usize>> {
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }

        loop {
            let input = self.prompt("Opción (Intro = sin seleccionar): ")?;
            if input.is_empty() {
                return Some(None);
            }
            match input.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Some(Some(n - 1)),
                _ => println!("Opción no válida."),
            }
        }
    }

    fn prompt(&self, text: &str) -> Option<String> {
        print!("{}", text);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(_) => None,
        }
    }
}
