use anyhow::bail;
use clap::Args;
use contact_client::{FormState, SubmitError};
use contact_config::Config;
use contact_models::contact::ContactField;
use url::Url;

use crate::environment;

#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Full name of the sender
    #[arg(long)]
    pub name: String,
    /// Email address of the sender
    #[arg(long)]
    pub email: String,
    /// The message to send
    #[arg(long)]
    pub message: String,
    /// Contact endpoint to send the message to, overriding `client.url`
    #[arg(long)]
    pub url: Option<Url>,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let url = self.url.unwrap_or(config.client.url);
        let mut form = environment::contact_form(url, config.client.revert_after.into())?;

        form.set_field(ContactField::Name, self.name)?;
        form.set_field(ContactField::Email, self.email)?;
        form.set_field(ContactField::Message, self.message)?;

        match form.submit().await {
            Ok(FormState::Succeeded { acknowledged_at }) => {
                println!("Message sent successfully at {acknowledged_at}");
                Ok(())
            }
            Ok(FormState::Failed { message }) => bail!("{message}"),
            Ok(state) => bail!("Unexpected form state after submission: {state:?}"),
            Err(SubmitError::Validation(errors)) => {
                for error in errors.iter() {
                    eprintln!("{}: {}", error.field, error.message);
                }
                bail!("The contact form is invalid")
            }
            Err(err) => Err(err.into()),
        }
    }
}
