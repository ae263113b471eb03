//! The startup gate state machine.

use super::session_token::AuthenticatedSession;
use super::state::GateState;
use super::surface::{LoginAction, LoginSurface, RotationAction, RotationSurface};
use prospect_core::auth::{
    AuthError, CredentialRotator, CredentialValidator, SecretPolicy, ValidationOutcome, rotate_secret,
};
use prospect_core::profile::ProfileRepository;
use prospect_core::session::SessionStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

/// How the startup sequence ended.
#[derive(Debug)]
pub enum BootstrapOutcome {
    /// The user is signed in and may enter the main window.
    Ready(AuthenticatedSession),
    /// The user cancelled; the process should exit.
    Terminated,
}

/// Marks one pending round-trip; cleared on drop.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, AuthError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| AuthError::AttemptInFlight)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives login and mandatory secret rotation before the main window opens.
///
/// All operations take `&self` so the controller can sit behind an `Arc`
/// and be cancelled from another task while a validation is pending.
pub struct BootstrapController {
    validator: Arc<dyn CredentialValidator>,
    rotator: Arc<dyn CredentialRotator>,
    profiles: Arc<dyn ProfileRepository>,
    session: Arc<SessionStore>,
    policy: SecretPolicy,
    state: Mutex<GateState>,
    in_flight: AtomicBool,
    cancel: CancellationToken,
}

impl BootstrapController {
    pub fn new(
        validator: Arc<dyn CredentialValidator>,
        rotator: Arc<dyn CredentialRotator>,
        profiles: Arc<dyn ProfileRepository>,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            validator,
            rotator,
            profiles,
            session,
            policy: SecretPolicy::default(),
            state: Mutex::new(GateState::AwaitingLogin),
            in_flight: AtomicBool::new(false),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_policy(mut self, policy: SecretPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> GateState {
        *self.lock_state()
    }

    fn lock_state(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn expect_state(&self, operation: &'static str, expected: GateState) -> Result<(), AuthError> {
        let current = self.state();
        if current == expected {
            Ok(())
        } else {
            Err(AuthError::InvalidGateState {
                operation,
                state: current.to_string(),
            })
        }
    }

    /// Checks a login submission with the authority and the profile store.
    ///
    /// On success returns the state the gate moved to. Every error leaves
    /// the gate in `AwaitingLogin`. If the gate is cancelled while the
    /// authority has not answered yet, the answer is discarded and
    /// `Terminated` is returned.
    pub async fn submit_login(&self, identifier: &str, secret: &str) -> Result<GateState, AuthError> {
        self.expect_state("submit_login", GateState::AwaitingLogin)?;
        let _attempt = InFlight::acquire(&self.in_flight)?;

        tracing::info!("[Bootstrap] Validating credentials for '{}'", identifier);
        let outcome = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::info!("[Bootstrap] Login cancelled while validation was pending");
                return Ok(GateState::Terminated);
            }
            outcome = self.validator.validate(identifier, secret) => outcome,
        };

        let rotation_signal = match outcome {
            ValidationOutcome::Accepted => false,
            ValidationOutcome::AcceptedRotationRequired => true,
            ValidationOutcome::Rejected { reason } => {
                tracing::info!("[Bootstrap] Credentials for '{}' rejected", identifier);
                return Err(AuthError::CredentialRejected { reason });
            }
            ValidationOutcome::Unreachable { detail } => {
                tracing::warn!("[Bootstrap] Authority unreachable: {}", detail);
                return Err(AuthError::TransportUnavailable { detail });
            }
        };

        let mut profile = match self.profiles.find_by_identifier(identifier).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                tracing::error!(
                    "[Bootstrap] Authority accepted '{}' but no local profile exists",
                    identifier
                );
                return Err(AuthError::ProfileInconsistency {
                    identifier: identifier.to_string(),
                });
            }
            Err(e) => {
                tracing::error!("[Bootstrap] Profile lookup failed: {}", e);
                return Err(AuthError::ProfileStoreUnavailable {
                    detail: e.to_string(),
                });
            }
        };

        // Either signal alone is enough; the session carries the combined flag.
        profile.must_rotate_credential |= rotation_signal;
        let next = if profile.must_rotate_credential {
            GateState::AwaitingRotation
        } else {
            GateState::Ready
        };

        let mut state = self.lock_state();
        if *state != GateState::AwaitingLogin {
            tracing::info!("[Bootstrap] Discarding login result, gate is {}", *state);
            return Ok(*state);
        }
        self.session.sign_in(profile);
        *state = next;
        tracing::info!("[Bootstrap] Gate moved to {}", next);
        Ok(next)
    }

    /// Replaces the secret of the signed-in participant.
    ///
    /// The local policy is checked first; a violation never reaches the
    /// authority.
    pub async fn submit_rotation(&self, new_secret: &str) -> Result<GateState, AuthError> {
        self.expect_state("submit_rotation", GateState::AwaitingRotation)?;
        let _attempt = InFlight::acquire(&self.in_flight)?;

        let profile = self
            .session
            .current()
            .ok_or_else(|| AuthError::InvalidGateState {
                operation: "submit_rotation",
                state: "no signed-in profile".to_string(),
            })?;

        let rotation = rotate_secret(&self.policy, self.rotator.as_ref(), &profile.identifier, new_secret);
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Ok(GateState::Terminated),
            result = rotation => result,
        };
        result?;

        let mut state = self.lock_state();
        if *state != GateState::AwaitingRotation {
            return Ok(*state);
        }
        self.session.clear_rotation_flag();
        *state = GateState::Ready;
        tracing::info!("[Bootstrap] Secret rotated for '{}'", profile.identifier);
        Ok(GateState::Ready)
    }

    /// Abandons the startup sequence.
    ///
    /// Allowed while awaiting login or rotation, including while a round-trip
    /// is pending. Leaving the rotation gate signs the participant out again.
    /// Cancelling an already terminated gate is a no-op.
    pub fn cancel(&self) -> Result<GateState, AuthError> {
        let mut state = self.lock_state();
        match *state {
            GateState::AwaitingLogin => {}
            GateState::AwaitingRotation => self.session.sign_out(),
            GateState::Terminated => return Ok(GateState::Terminated),
            GateState::Ready => {
                return Err(AuthError::InvalidGateState {
                    operation: "cancel",
                    state: state.to_string(),
                });
            }
        }
        tracing::info!("[Bootstrap] Cancelled in {}", *state);
        *state = GateState::Terminated;
        self.cancel.cancel();
        Ok(GateState::Terminated)
    }

    /// Returns the token that opens the main window. Only valid in `Ready`.
    pub fn authenticated_session(&self) -> Result<AuthenticatedSession, AuthError> {
        self.expect_state("authenticated_session", GateState::Ready)?;
        let profile = self
            .session
            .current()
            .ok_or_else(|| AuthError::InvalidGateState {
                operation: "authenticated_session",
                state: "no signed-in profile".to_string(),
            })?;
        Ok(AuthenticatedSession::new(profile, self.session.clone()))
    }

    /// Runs both gates through the given surfaces until the sequence ends.
    pub async fn run(
        &self,
        login: &mut dyn LoginSurface,
        rotation: &mut dyn RotationSurface,
    ) -> BootstrapOutcome {
        let mut feedback: Option<AuthError> = None;

        loop {
            match self.state() {
                GateState::AwaitingLogin => match login.present(feedback.as_ref()).await {
                    LoginAction::Submit { identifier, secret } => {
                        feedback = self.submit_login(&identifier, &secret).await.err();
                    }
                    LoginAction::Cancel => {
                        feedback = self.cancel().err();
                    }
                },
                GateState::AwaitingRotation => {
                    let Some(profile) = self.session.current() else {
                        tracing::error!("[Bootstrap] Rotation gate without a signed-in profile");
                        feedback = self.cancel().err();
                        continue;
                    };
                    match rotation.present(&profile, feedback.as_ref()).await {
                        RotationAction::Submit { new_secret } => {
                            feedback = self.submit_rotation(&new_secret).await.err();
                        }
                        RotationAction::Cancel => {
                            feedback = self.cancel().err();
                        }
                    }
                }
                GateState::Ready => {
                    return match self.authenticated_session() {
                        Ok(token) => BootstrapOutcome::Ready(token),
                        Err(e) => {
                            tracing::error!("[Bootstrap] Ready without a session: {}", e);
                            BootstrapOutcome::Terminated
                        }
                    };
                }
                GateState::Terminated => return BootstrapOutcome::Terminated,
            }
        }
    }
}
