//! Translation of optional user criteria into store predicates.
//!
//! Every builder validates its input before anything is sent to the store:
//! malformed ids, unknown field names and unparsable name patterns come back
//! as [`UserError::InvalidArgument`].

use crate::domain::{FieldFilter, UserCriteria, UserField, UserId};
use crate::filter::{Filter, Pattern};
use crate::user_actor::UserError;

pub type UserFilter = Filter<UserField>;

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub fn parse_id(raw: &str) -> Result<UserId, UserError> {
    UserId::parse(raw)
        .ok_or_else(|| UserError::InvalidArgument(format!("Invalid identifier: {raw}")))
}

pub fn name_pattern(query: &str) -> Result<Pattern, UserError> {
    Pattern::case_insensitive(query)
        .map_err(|e| UserError::InvalidArgument(format!("Invalid name pattern: {e}")))
}

/// `email == ? OR username == ?` over whichever keys are present.
pub fn username_or_email(
    email: Option<&str>,
    username: Option<&str>,
) -> Result<UserFilter, UserError> {
    let clauses: Vec<_> = [(UserField::Email, email), (UserField::Username, username)]
        .into_iter()
        .filter_map(|(field, value)| present(value).map(|v| Filter::Eq(field, v.to_string())))
        .collect();
    if clauses.is_empty() {
        return Err(UserError::InvalidArgument(
            "Either email or username is required".to_string(),
        ));
    }
    Ok(Filter::Or(clauses))
}

/// `email == ?`. An empty email is rejected rather than matched.
pub fn by_email(email: &str) -> Result<UserFilter, UserError> {
    present(Some(email))
        .map(|email| Filter::Eq(UserField::Email, email.to_string()))
        .ok_or_else(|| UserError::InvalidArgument("Email is required".to_string()))
}

/// `_id == ? OR email == ? OR username == ?` over whichever keys are present.
pub fn id_or_email_or_username(criteria: &UserCriteria) -> Result<UserFilter, UserError> {
    let mut clauses = Vec::new();
    if let Some(id) = present(criteria.id.as_deref()) {
        clauses.push(Filter::Eq(UserField::Id, parse_id(id)?.to_string()));
    }
    if let Some(email) = present(criteria.email.as_deref()) {
        clauses.push(Filter::Eq(UserField::Email, email.to_string()));
    }
    if let Some(username) = present(criteria.username.as_deref()) {
        clauses.push(Filter::Eq(UserField::Username, username.to_string()));
    }
    if clauses.is_empty() {
        return Err(UserError::InvalidArgument(
            "One of id, email or username is required".to_string(),
        ));
    }
    Ok(Filter::Or(clauses))
}

/// Conjunction of every present criterion. No criteria matches all users.
pub fn by_criteria(criteria: &UserCriteria) -> Result<UserFilter, UserError> {
    let mut clauses = Vec::new();
    if let Some(id) = present(criteria.id.as_deref()) {
        clauses.push(Filter::Eq(UserField::Id, parse_id(id)?.to_string()));
    }
    if let Some(name) = present(criteria.name.as_deref()) {
        clauses.push(Filter::Matches(UserField::Name, name_pattern(name)?));
    }
    if let Some(email) = present(criteria.email.as_deref()) {
        clauses.push(Filter::Eq(UserField::Email, email.to_string()));
    }
    if let Some(username) = present(criteria.username.as_deref()) {
        clauses.push(Filter::Eq(UserField::Username, username.to_string()));
    }
    if clauses.is_empty() {
        return Ok(Filter::All);
    }
    Ok(Filter::And(clauses))
}

fn resolve(pair: &FieldFilter) -> Result<(UserField, String), UserError> {
    let field: UserField = pair.field.parse().map_err(UserError::InvalidArgument)?;
    let value = match field {
        UserField::Id => parse_id(&pair.value)?.to_string(),
        _ => pair.value.clone(),
    };
    Ok((field, value))
}

/// `exclude.field != exclude.value AND filter.field == filter.value`.
pub fn excluding(filter: &FieldFilter, exclude: &FieldFilter) -> Result<UserFilter, UserError> {
    let (match_field, match_value) = resolve(filter)?;
    let (skip_field, skip_value) = resolve(exclude)?;
    Ok(Filter::And(vec![
        Filter::Ne(skip_field, skip_value),
        Filter::Eq(match_field, match_value),
    ]))
}
