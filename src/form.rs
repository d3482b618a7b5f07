//! The claim form: field state plus the single submit action that runs
//! validate → compose → sign → submit → report.

use crate::address::{is_address_format, is_valid_address, normalize};
use crate::allow_list::AllowList;
use crate::error::{AddressField, ClaimError, SigningError};
use crate::message::{TxReference, compose};
use crate::notify::{Notification, Notifier};
use crate::signer::{MessageSigner, verify_signature};
use crate::submit::{SubmissionClient, SubmissionRequest};
use crate::wallet::{AccountWatch, WalletConnection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Switches that cover the differences between deployments of the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRules {
    /// Also run the format check on the victim address.
    pub victim_address_check: bool,
    /// Collect transaction references and include them in the signed message.
    pub transaction_references: bool,
    /// Recover the signer locally before submitting. Off unless asked for.
    pub verify_signature: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub victim_address: String,
    pub new_address: String,
    pub ticket_id: String,
    pub tx_references: Vec<TxReference>,
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Editing,
    Validating,
    AwaitingSignature,
    Submitting,
    Succeeded,
    Failed,
}

pub struct FormController<S, N> {
    wallet: Arc<WalletConnection<S>>,
    account: AccountWatch,
    allow_list: AllowList,
    client: SubmissionClient,
    notifier: N,
    rules: ValidationRules,
    signing_timeout: Option<Duration>,
    input: FormInput,
    state: FormState,
}

impl<S: MessageSigner, N: Notifier> FormController<S, N> {
    pub fn new(
        wallet: Arc<WalletConnection<S>>,
        allow_list: AllowList,
        client: SubmissionClient,
        notifier: N,
        rules: ValidationRules,
    ) -> Self {
        let account = wallet.subscribe();
        let mut controller = Self {
            wallet,
            account,
            allow_list,
            client,
            notifier,
            rules,
            signing_timeout: None,
            input: FormInput::default(),
            state: FormState::Editing,
        };
        controller.apply_account();
        controller
    }

    /// Gives up on the wallet after `timeout` instead of waiting forever.
    pub fn with_signing_timeout(mut self, timeout: Duration) -> Self {
        self.signing_timeout = Some(timeout);
        self
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn rules(&self) -> ValidationRules {
        self.rules
    }

    pub fn set_new_address(&mut self, address: impl Into<String>) {
        self.input.new_address = address.into();
    }

    pub fn set_ticket_id(&mut self, ticket_id: impl Into<String>) {
        self.input.ticket_id = ticket_id.into();
    }

    /// Fails when the rules say references are not part of the signed message.
    pub fn add_tx_reference(&mut self, reference: TxReference) -> Result<(), ClaimError> {
        if !self.rules.transaction_references {
            return Err(ClaimError::ReferencesNotCollected);
        }
        self.input.tx_references.push(reference);
        Ok(())
    }

    /// Copies a pending account change into the victim address field.
    pub fn sync_account(&mut self) {
        if self.account.has_changed().unwrap_or(false) {
            self.apply_account();
        }
    }

    /// Waits for the next account change and applies it.
    pub async fn watch_account(&mut self) {
        // The controller holds the connection, so the sender outlives this receiver.
        if self.account.changed().await.is_ok() {
            self.apply_account();
        }
    }

    fn apply_account(&mut self) {
        let account = *self.account.borrow_and_update();
        self.input.victim_address = account.map(|a| a.to_string()).unwrap_or_default();
        debug!("Victim address synced to '{}'", self.input.victim_address);
    }

    fn transition(&mut self, next: FormState) {
        debug!("Form state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Runs one submission and reports the outcome through the notifier.
    ///
    /// Fields keep their values on failure and the form goes back to
    /// [`FormState::Editing`].
    pub async fn submit(&mut self) -> Result<String, ClaimError> {
        self.sync_account();
        let outcome = self.run_submission().await;
        match &outcome {
            Ok(message) => {
                self.transition(FormState::Succeeded);
                self.notifier.notify(Notification::success(message.clone()));
            }
            Err(err) => {
                debug!("Submit failed: {}", err);
                self.transition(FormState::Failed);
                self.notifier.notify(Notification::failure(err.to_string()));
                self.transition(FormState::Editing);
            }
        }
        outcome
    }

    async fn run_submission(&mut self) -> Result<String, ClaimError> {
        self.transition(FormState::Validating);
        self.input.signature = None;
        self.validate()?;

        let references: &[TxReference] = if self.rules.transaction_references {
            &self.input.tx_references
        } else {
            &[]
        };
        let message = compose(
            &self.input.victim_address,
            &self.input.new_address,
            references,
        );

        let signer = self.wallet.signer().ok_or(SigningError::NotConnected)?;
        self.transition(FormState::AwaitingSignature);
        info!("Requesting signature for {}", self.input.victim_address);
        let signature = match self.signing_timeout {
            Some(timeout) => tokio::time::timeout(timeout, signer.sign_message(message.as_str()))
                .await
                .map_err(|_| SigningError::Timeout)??,
            None => signer.sign_message(message.as_str()).await?,
        };
        self.input.signature = Some(signature.clone());

        if self.rules.verify_signature {
            verify_signature(message.as_str(), &signature, &self.input.victim_address)?;
        }

        self.transition(FormState::Submitting);
        let request = SubmissionRequest {
            old_address: self.input.victim_address.clone(),
            new_address: self.input.new_address.clone(),
            ticket_id: self.input.ticket_id.clone(),
            signature,
        };
        self.client.submit(&request).await
    }

    /// Every check that must pass before the wallet is asked to sign.
    pub fn validate(&self) -> Result<(), ClaimError> {
        let input = &self.input;
        require_len(&input.victim_address, 2, "Victim address must be at least 2 characters.")?;
        require_len(&input.new_address, 2, "New address must be at least 2 characters.")?;
        require_len(&input.ticket_id, 2, "Ticket ID must be at least 2 characters.")?;
        if self.rules.transaction_references {
            for reference in &input.tx_references {
                require_len(&reference.hash, 2, "Please enter a valid hash.")?;
                require_len(&reference.chain_name, 1, "Please select chain.")?;
            }
        }

        if self.rules.victim_address_check && !is_address_format(&input.victim_address) {
            return Err(ClaimError::Format(AddressField::Victim));
        }
        if !is_address_format(&input.new_address) {
            return Err(ClaimError::Format(AddressField::New));
        }
        if !self.allow_list.contains(&input.victim_address) {
            return Err(ClaimError::NotAllowListed(input.victim_address.clone()));
        }
        if normalize(&input.victim_address) == normalize(&input.new_address) {
            return Err(ClaimError::SameAddress);
        }
        if !is_valid_address(&input.new_address) {
            return Err(ClaimError::InvalidDestination);
        }
        Ok(())
    }
}

fn require_len(value: &str, min: usize, message: &str) -> Result<(), ClaimError> {
    if value.chars().count() < min {
        return Err(ClaimError::Incomplete(message.to_string()));
    }
    Ok(())
}
