use crate::config::MailerConfig;
use crate::domain::model::{Artifact, DispatchOutcome, XLSX_MIME};
use crate::domain::ports::{ActivityLog, Notifier};
use async_trait::async_trait;
use chrono::Local;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// Sends the finished workbook to the fixed recipient through the Mailgun
/// messages API. Faults stop here: every path returns an outcome, and every
/// call leaves exactly one activity record.
pub struct MailgunNotifier<L: ActivityLog> {
    config: MailerConfig,
    client: Client,
    log: L,
}

impl<L: ActivityLog> MailgunNotifier<L> {
    pub fn new(config: MailerConfig, log: L) -> Self {
        Self {
            config,
            client: Client::new(),
            log,
        }
    }

    fn note(&self, accion: &str) {
        if let Err(e) = self.log.record(accion) {
            tracing::warn!("Activity log write failed: {}", e);
        }
    }

    async fn post(
        &self,
        domain: &str,
        api_key: &str,
        artifact: &Artifact,
        unit: &str,
        fecha: &str,
    ) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let url = format!(
            "{}/{}/messages",
            self.config.api_base.trim_end_matches('/'),
            domain
        );

        let attachment = Part::bytes(artifact.bytes.clone())
            .file_name(artifact.filename.clone())
            .mime_str(XLSX_MIME)?;

        let form = Form::new()
            .text("from", format!("Sistema SCS <sistema@{}>", domain))
            .text("to", self.config.recipient.clone())
            .text("subject", format!("Capacidad docente {} {}", unit, fecha))
            .text(
                "text",
                format!(
                    "Adjunto archivo de capacidad docente para {} generado el {}",
                    unit, fecha
                ),
            )
            .part("attachment", attachment);

        tracing::debug!("Posting artifact {} to {}", artifact.filename, url);
        self.client
            .post(&url)
            .basic_auth("api", Some(api_key))
            .multipart(form)
            .send()
            .await
    }
}

#[async_trait]
impl<L: ActivityLog> Notifier for MailgunNotifier<L> {
    async fn dispatch(&self, artifact: &Artifact, unit: &str) -> DispatchOutcome {
        let (domain, api_key) = match (&self.config.domain, &self.config.api_key) {
            (Some(domain), Some(api_key)) => (domain.clone(), api_key.clone()),
            _ => {
                self.note("Error enviando email: variables de MailGun no configuradas");
                return DispatchOutcome {
                    sent: false,
                    message: "Error: Variables de entorno de MailGun no configuradas".to_string(),
                };
            }
        };

        let fecha = Local::now().format("%Y-%m-%d").to_string();

        match self.post(&domain, &api_key, artifact, unit, &fecha).await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!("Mailgun response status: {}", status);

                if status.is_success() {
                    self.note(&format!("Email enviado exitosamente para {}", unit));
                    DispatchOutcome {
                        sent: true,
                        message: "Archivo enviado correctamente por email".to_string(),
                    }
                } else {
                    self.note(&format!("Error enviando email: {}", status.as_u16()));
                    DispatchOutcome {
                        sent: false,
                        message: format!("Error al enviar email: {}", status.as_u16()),
                    }
                }
            }
            Err(e) => {
                self.note(&format!("Excepción enviando email: {}", e));
                DispatchOutcome {
                    sent: false,
                    message: format!("Error al enviar email: {}", e),
                }
            }
        }
    }
}
