// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AccessClaims,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::account::AccountId;
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::time::{Duration, UNIX_EPOCH};

pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AccessClaims> {
    let ctx = ClaimsContext::from_facts(facts);

    let subject = ctx
        .subject
        .ok_or_else(|| ApplicationError::unauthorized("missing subject"))?;
    let subject: AccountId = subject
        .parse()
        .map_err(|_| ApplicationError::unauthorized("malformed subject"))?;
    let issued_at = ctx
        .issued_at
        .ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
    let expires_at = ctx
        .expires_at
        .ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

    Ok(AccessClaims {
        subject,
        issued_at,
        expires_at,
    })
}

#[derive(Default)]
struct ClaimsContext {
    subject: Option<String>,
    issued_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
}

impl ClaimsContext {
    fn from_facts(facts: Vec<Fact>) -> Self {
        let mut ctx = Self::default();
        for fact in facts {
            ctx.apply_predicate(&fact.predicate);
        }
        ctx
    }

    fn apply_predicate(&mut self, predicate: &Predicate) {
        match predicate.name.as_str() {
            "user" => {
                if let Some(Term::Str(sub)) = predicate.terms.first() {
                    self.subject = Some(sub.clone());
                }
            }
            "issued_at" => self.issued_at = date_term(predicate),
            "expires_at" => self.expires_at = date_term(predicate),
            _ => {}
        }
    }
}

fn date_term(predicate: &Predicate) -> Option<DateTime<Utc>> {
    match predicate.terms.first() {
        Some(Term::Date(seconds)) => Some(DateTime::<Utc>::from(
            UNIX_EPOCH + Duration::from_secs(*seconds),
        )),
        _ => None,
    }
}
