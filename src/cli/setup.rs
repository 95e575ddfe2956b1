//! Interactive bank link setup
//!
//! The bank link widget runs in a browser. The terminal host prints the
//! link token for it and then asks for the values the widget reports back.

use async_trait::async_trait;

use super::{print_notifications, prompt_string};
use crate::api::{Backend, InstitutionMetadata};
use crate::config::{Settings, SpendlinkPaths};
use crate::error::SpendlinkResult;
use crate::services::AuthService;
use crate::setup::{
    IntroChoice, LinkTokenStatus, ManualChoice, SetupHost, SetupRunner,
    WizardState, LINK_UNAVAILABLE_MESSAGE, MAX_POLL_ATTEMPTS,
};
use crate::store::StoreHandle;

/// [`SetupHost`] reading choices from stdin
#[derive(Debug, Default)]
pub struct TerminalHost;

#[async_trait]
impl SetupHost for TerminalHost {
    fn render(&self, state: &WizardState) {
        match state {
            WizardState::Intro {
                link: LinkTokenStatus::Loading,
            } => {
                println!();
                println!("===========================================");
                println!("  Welcome to spendlink!");
                println!("===========================================");
                println!();
                println!("To continue you need to set up a bank account. You can link your");
                println!("bank so balances and transactions are imported for you, or set up");
                println!("a manual account and enter everything yourself.");
                println!();
                println!("Cancel to log out without setting anything up.");
                println!("Preparing bank link...");
            }
            WizardState::Intro {
                link: LinkTokenStatus::Ready(_),
            } => println!("Bank link ready."),
            WizardState::Intro {
                link: LinkTokenStatus::Failed,
            } => println!("{}", LINK_UNAVAILABLE_MESSAGE),
            WizardState::Manual { .. } => {
                println!();
                println!("Manual accounts are entered by hand. Continue to finish setup.");
            }
            WizardState::Exchanging => println!("Linking your bank..."),
            WizardState::Polling { link_id } => println!(
                "Waiting for link {} to import its first data (up to {} checks)...",
                link_id, MAX_POLL_ATTEMPTS
            ),
            WizardState::Refreshing { .. } => println!("Loading your accounts..."),
            // Outcomes are reported once the run ends
            WizardState::Complete { .. }
            | WizardState::ManualComplete
            | WizardState::Cancelled
            | WizardState::Failed { .. } => {}
        }
    }

    async fn choose_intro(&self, link: &LinkTokenStatus) -> SpendlinkResult<IntroChoice> {
        let can_link = link.widget_token().is_some();
        let prompt = if can_link {
            "[l]ink bank, [m]anual, [c]ancel: "
        } else {
            "[m]anual, [c]ancel: "
        };

        loop {
            match prompt_string(prompt).await?.to_lowercase().as_str() {
                "l" | "link" if can_link => return Ok(IntroChoice::Link),
                "m" | "manual" => return Ok(IntroChoice::Manual),
                "c" | "cancel" => return Ok(IntroChoice::Cancel),
                _ => println!("Please choose one of the options."),
            }
        }
    }

    async fn choose_manual(&self) -> SpendlinkResult<ManualChoice> {
        loop {
            match prompt_string("[b]ack, [c]ontinue: ").await?.to_lowercase().as_str() {
                "b" | "back" => return Ok(ManualChoice::Back),
                "c" | "continue" => return Ok(ManualChoice::Continue),
                _ => println!("Please choose one of the options."),
            }
        }
    }

    async fn open_link(
        &self,
        link_token: &str,
    ) -> SpendlinkResult<Option<(String, InstitutionMetadata)>> {
        println!();
        println!("Open the bank link widget with this token:");
        println!("  {}", link_token);
        println!("When it finishes, enter the values it reports. Leave the public");
        println!("token empty to go back.");
        println!();

        let public_token = prompt_string("Public token: ").await?;
        if public_token.is_empty() {
            return Ok(None);
        }
        let institution_id = prompt_string("Institution id: ").await?;
        let institution_name = prompt_string("Institution name: ").await?;
        let account_ids = parse_account_ids(&prompt_string("Account ids (comma separated): ").await?);

        Ok(Some((
            public_token,
            InstitutionMetadata {
                institution_id,
                institution_name,
                account_ids,
            },
        )))
    }
}

fn parse_account_ids(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Handle `spendlink setup`
pub async fn handle_setup_command(
    backend: &dyn Backend,
    store: &StoreHandle,
    paths: &SpendlinkPaths,
) -> SpendlinkResult<()> {
    AuthService::new(backend, store).require_authenticated()?;

    let host = TerminalHost;
    let report = SetupRunner::new(backend, store, &host).run().await?;
    print_notifications(report.notifications());

    if report.completed() {
        // Reload so command line overrides are not written back
        let mut settings = Settings::load_or_create(paths)?;
        settings.setup_completed = true;
        settings.save(paths)?;
    }
    Ok(())
}
