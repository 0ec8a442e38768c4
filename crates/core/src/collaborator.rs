//! Collaborator entity, field enums, and input validation.

use chrono::{DateTime, NaiveDate, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::{CollaboratorId, UserId};
use crate::validate::{valid_cpf, valid_email, valid_phone, valid_zip};

/// Collaborator record lifecycle status.
///
/// All three states are reachable from each other by an authorized update;
/// `Inactive` is additionally the target of the soft-delete path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl CollaboratorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollaboratorStatus::Active => "active",
            CollaboratorStatus::Inactive => "inactive",
            CollaboratorStatus::Suspended => "suspended",
        }
    }
}

impl FromStr for CollaboratorStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CollaboratorStatus::Active),
            "inactive" => Ok(CollaboratorStatus::Inactive),
            "suspended" => Ok(CollaboratorStatus::Suspended),
            other => Err(DomainError::validation(format!(
                "status must be one of: active, inactive, suspended (got '{other}')"
            ))),
        }
    }
}

impl core::fmt::Display for CollaboratorStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bank account kind for payment details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankAccountType {
    Checking,
    Savings,
}

impl BankAccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BankAccountType::Checking => "checking",
            BankAccountType::Savings => "savings",
        }
    }
}

impl FromStr for BankAccountType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checking" => Ok(BankAccountType::Checking),
            "savings" => Ok(BankAccountType::Savings),
            other => Err(DomainError::validation(format!(
                "bank_account_type must be one of: checking, savings (got '{other}')"
            ))),
        }
    }
}

/// Kind of key used to route PIX instant payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixKeyType {
    Cpf,
    Email,
    Phone,
    Random,
}

impl PixKeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PixKeyType::Cpf => "cpf",
            PixKeyType::Email => "email",
            PixKeyType::Phone => "phone",
            PixKeyType::Random => "random",
        }
    }
}

impl FromStr for PixKeyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpf" => Ok(PixKeyType::Cpf),
            "email" => Ok(PixKeyType::Email),
            "phone" => Ok(PixKeyType::Phone),
            "random" => Ok(PixKeyType::Random),
            other => Err(DomainError::validation(format!(
                "pix_key_type must be one of: cpf, email, phone, random (got '{other}')"
            ))),
        }
    }
}

/// The 27 Brazilian federative unit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrState {
    AC, AL, AP, AM, BA, CE, DF, ES, GO, MA,
    MT, MS, MG, PA, PB, PR, PE, PI, RJ, RN,
    RS, RO, RR, SC, SP, SE, TO,
}

impl BrState {
    pub const ALL: [BrState; 27] = [
        BrState::AC, BrState::AL, BrState::AP, BrState::AM, BrState::BA,
        BrState::CE, BrState::DF, BrState::ES, BrState::GO, BrState::MA,
        BrState::MT, BrState::MS, BrState::MG, BrState::PA, BrState::PB,
        BrState::PR, BrState::PE, BrState::PI, BrState::RJ, BrState::RN,
        BrState::RS, BrState::RO, BrState::RR, BrState::SC, BrState::SP,
        BrState::SE, BrState::TO,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BrState::AC => "AC", BrState::AL => "AL", BrState::AP => "AP",
            BrState::AM => "AM", BrState::BA => "BA", BrState::CE => "CE",
            BrState::DF => "DF", BrState::ES => "ES", BrState::GO => "GO",
            BrState::MA => "MA", BrState::MT => "MT", BrState::MS => "MS",
            BrState::MG => "MG", BrState::PA => "PA", BrState::PB => "PB",
            BrState::PR => "PR", BrState::PE => "PE", BrState::PI => "PI",
            BrState::RJ => "RJ", BrState::RN => "RN", BrState::RS => "RS",
            BrState::RO => "RO", BrState::RR => "RR", BrState::SC => "SC",
            BrState::SP => "SP", BrState::SE => "SE", BrState::TO => "TO",
        }
    }
}

impl FromStr for BrState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BrState::ALL
            .iter()
            .find(|st| st.as_str() == s)
            .copied()
            .ok_or_else(|| {
                DomainError::validation(format!("state must be a Brazilian state code (got '{s}')"))
            })
    }
}

impl core::fmt::Display for BrState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collaborator record as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: CollaboratorId,

    // Personal
    pub name: String,
    pub cpf: String,
    pub birth_date: Option<NaiveDate>,
    pub rg: Option<String>,
    pub rg_issuer: Option<String>,

    // Contact
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile_phone: Option<String>,

    // Address
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<BrState>,
    pub zip_code: Option<String>,

    // Banking
    pub bank_name: Option<String>,
    pub bank_agency: Option<String>,
    pub bank_account: Option<String>,
    pub bank_account_type: Option<BankAccountType>,
    pub pix_key: Option<String>,
    pub pix_key_type: Option<PixKeyType>,

    // Audit
    pub status: CollaboratorStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
    pub updated_by: Option<UserId>,
}

/// Validated input for creating a collaborator.
///
/// Audit fields are absent here on purpose: the server stamps them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorDraft {
    pub name: String,
    pub cpf: String,
    pub birth_date: Option<NaiveDate>,
    pub rg: Option<String>,
    pub rg_issuer: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<BrState>,
    pub zip_code: Option<String>,
    pub bank_name: Option<String>,
    pub bank_agency: Option<String>,
    pub bank_account: Option<String>,
    pub bank_account_type: Option<BankAccountType>,
    pub pix_key: Option<String>,
    pub pix_key_type: Option<PixKeyType>,
}

/// Partial update: only supplied fields change.
///
/// `status` is settable here; the soft-delete path is this patch with
/// `status = Some(Inactive)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorPatch {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub rg: Option<String>,
    pub rg_issuer: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<BrState>,
    pub zip_code: Option<String>,
    pub bank_name: Option<String>,
    pub bank_agency: Option<String>,
    pub bank_account: Option<String>,
    pub bank_account_type: Option<BankAccountType>,
    pub pix_key: Option<String>,
    pub pix_key_type: Option<PixKeyType>,
    pub status: Option<CollaboratorStatus>,
}

fn check_len(field: &'static str, value: &str, max: usize) -> DomainResult<()> {
    if value.chars().count() > max {
        return Err(DomainError::validation(format!(
            "{field} must have at most {max} characters"
        )));
    }
    Ok(())
}

fn check_name(name: &str) -> DomainResult<()> {
    let len = name.chars().count();
    if len < 2 {
        return Err(DomainError::validation("name must have at least 2 characters"));
    }
    if len > 255 {
        return Err(DomainError::validation("name must have at most 255 characters"));
    }
    Ok(())
}

fn check_email(email: &str) -> DomainResult<()> {
    if !valid_email(email) {
        return Err(DomainError::validation("email is not a valid address"));
    }
    Ok(())
}

fn check_optional(
    field: &'static str,
    value: Option<&String>,
    check: impl Fn(&str) -> bool,
) -> DomainResult<()> {
    match value {
        Some(v) if !v.is_empty() && !check(v) => {
            Err(DomainError::validation(format!("{field} is not valid")))
        }
        _ => Ok(()),
    }
}

impl CollaboratorDraft {
    /// Validate every field rule; called before any store access.
    pub fn validate(&self) -> DomainResult<()> {
        check_name(&self.name)?;
        if !valid_cpf(&self.cpf) {
            return Err(DomainError::validation("cpf is not valid"));
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            check_email(email)?;
        }
        check_optional("phone", self.phone.as_ref(), valid_phone)?;
        check_optional("mobile_phone", self.mobile_phone.as_ref(), valid_phone)?;
        check_optional("zip_code", self.zip_code.as_ref(), valid_zip)?;

        for (field, value, max) in [
            ("rg", &self.rg, 20usize),
            ("rg_issuer", &self.rg_issuer, 100),
            ("street", &self.street, 255),
            ("number", &self.number, 20),
            ("complement", &self.complement, 100),
            ("neighborhood", &self.neighborhood, 100),
            ("city", &self.city, 100),
            ("bank_name", &self.bank_name, 100),
            ("bank_agency", &self.bank_agency, 20),
            ("bank_account", &self.bank_account, 20),
            ("pix_key", &self.pix_key, 255),
        ] {
            if let Some(v) = value {
                check_len(field, v, max)?;
            }
        }
        Ok(())
    }
}

impl CollaboratorPatch {
    /// Validate the fields that are present; absent fields are untouched.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            check_name(name)?;
        }
        if let Some(cpf) = &self.cpf {
            if !valid_cpf(cpf) {
                return Err(DomainError::validation("cpf is not valid"));
            }
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            check_email(email)?;
        }
        check_optional("phone", self.phone.as_ref(), valid_phone)?;
        check_optional("mobile_phone", self.mobile_phone.as_ref(), valid_phone)?;
        check_optional("zip_code", self.zip_code.as_ref(), valid_zip)?;

        for (field, value, max) in [
            ("rg", &self.rg, 20usize),
            ("rg_issuer", &self.rg_issuer, 100),
            ("street", &self.street, 255),
            ("number", &self.number, 20),
            ("complement", &self.complement, 100),
            ("neighborhood", &self.neighborhood, 100),
            ("city", &self.city, 100),
            ("bank_name", &self.bank_name, 100),
            ("bank_agency", &self.bank_agency, 20),
            ("bank_account", &self.bank_account, 20),
            ("pix_key", &self.pix_key, 255),
        ] {
            if let Some(v) = value {
                check_len(field, v, max)?;
            }
        }
        Ok(())
    }

    /// A patch that only soft-deletes.
    pub fn deactivate() -> Self {
        Self {
            status: Some(CollaboratorStatus::Inactive),
            ..Self::default()
        }
    }
}

impl Collaborator {
    /// Materialize a draft into a record, stamping audit fields.
    pub fn from_draft(draft: CollaboratorDraft, created_by: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: CollaboratorId::new(),
            name: draft.name,
            cpf: draft.cpf,
            birth_date: draft.birth_date,
            rg: draft.rg,
            rg_issuer: draft.rg_issuer,
            email: draft.email,
            phone: draft.phone,
            mobile_phone: draft.mobile_phone,
            street: draft.street,
            number: draft.number,
            complement: draft.complement,
            neighborhood: draft.neighborhood,
            city: draft.city,
            state: draft.state,
            zip_code: draft.zip_code,
            bank_name: draft.bank_name,
            bank_agency: draft.bank_agency,
            bank_account: draft.bank_account,
            bank_account_type: draft.bank_account_type,
            pix_key: draft.pix_key,
            pix_key_type: draft.pix_key_type,
            status: CollaboratorStatus::Active,
            created_at: now,
            updated_at: now,
            created_by: Some(created_by),
            updated_by: None,
        }
    }

    /// Apply a patch in place, stamping `updated_by`/`updated_at`.
    pub fn apply_patch(&mut self, patch: CollaboratorPatch, updated_by: UserId, now: DateTime<Utc>) {
        let CollaboratorPatch {
            name,
            cpf,
            birth_date,
            rg,
            rg_issuer,
            email,
            phone,
            mobile_phone,
            street,
            number,
            complement,
            neighborhood,
            city,
            state,
            zip_code,
            bank_name,
            bank_agency,
            bank_account,
            bank_account_type,
            pix_key,
            pix_key_type,
            status,
        } = patch;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = cpf {
            self.cpf = v;
        }
        if let Some(v) = birth_date {
            self.birth_date = Some(v);
        }
        if let Some(v) = rg {
            self.rg = Some(v);
        }
        if let Some(v) = rg_issuer {
            self.rg_issuer = Some(v);
        }
        if let Some(v) = email {
            self.email = Some(v);
        }
        if let Some(v) = phone {
            self.phone = Some(v);
        }
        if let Some(v) = mobile_phone {
            self.mobile_phone = Some(v);
        }
        if let Some(v) = street {
            self.street = Some(v);
        }
        if let Some(v) = number {
            self.number = Some(v);
        }
        if let Some(v) = complement {
            self.complement = Some(v);
        }
        if let Some(v) = neighborhood {
            self.neighborhood = Some(v);
        }
        if let Some(v) = city {
            self.city = Some(v);
        }
        if let Some(v) = state {
            self.state = Some(v);
        }
        if let Some(v) = zip_code {
            self.zip_code = Some(v);
        }
        if let Some(v) = bank_name {
            self.bank_name = Some(v);
        }
        if let Some(v) = bank_agency {
            self.bank_agency = Some(v);
        }
        if let Some(v) = bank_account {
            self.bank_account = Some(v);
        }
        if let Some(v) = bank_account_type {
            self.bank_account_type = Some(v);
        }
        if let Some(v) = pix_key {
            self.pix_key = Some(v);
        }
        if let Some(v) = pix_key_type {
            self.pix_key_type = Some(v);
        }
        if let Some(v) = status {
            self.status = v;
        }

        self.updated_by = Some(updated_by);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CollaboratorDraft {
        CollaboratorDraft {
            name: "Maria Souza".to_string(),
            cpf: "52998224725".to_string(),
            ..CollaboratorDraft::default()
        }
    }

    #[test]
    fn minimal_draft_is_valid() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn draft_rejects_short_name_and_bad_cpf() {
        let mut d = draft();
        d.name = "M".to_string();
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));

        let mut d = draft();
        d.cpf = "12345678900".to_string();
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn draft_rejects_bad_optional_contacts() {
        let mut d = draft();
        d.email = Some("not-an-email".to_string());
        assert!(d.validate().is_err());

        let mut d = draft();
        d.phone = Some("123".to_string());
        assert!(d.validate().is_err());

        let mut d = draft();
        d.zip_code = Some("123".to_string());
        assert!(d.validate().is_err());
    }

    #[test]
    fn empty_optional_strings_are_tolerated() {
        // Forms submit empty strings for untouched fields.
        let mut d = draft();
        d.email = Some(String::new());
        d.phone = Some(String::new());
        assert!(d.validate().is_ok());
    }

    #[test]
    fn patch_applies_only_supplied_fields() {
        let now = Utc::now();
        let creator = UserId::new();
        let mut c = Collaborator::from_draft(draft(), creator, now);
        assert_eq!(c.status, CollaboratorStatus::Active);
        assert_eq!(c.created_by, Some(creator));

        let editor = UserId::new();
        let later = now + chrono::Duration::seconds(5);
        c.apply_patch(
            CollaboratorPatch {
                city: Some("Campinas".to_string()),
                ..CollaboratorPatch::default()
            },
            editor,
            later,
        );

        assert_eq!(c.city.as_deref(), Some("Campinas"));
        assert_eq!(c.name, "Maria Souza");
        assert_eq!(c.updated_by, Some(editor));
        assert_eq!(c.updated_at, later);
        assert_eq!(c.created_at, now);
    }

    #[test]
    fn deactivate_patch_only_touches_status() {
        let mut c = Collaborator::from_draft(draft(), UserId::new(), Utc::now());
        c.apply_patch(CollaboratorPatch::deactivate(), UserId::new(), Utc::now());
        assert_eq!(c.status, CollaboratorStatus::Inactive);
        assert_eq!(c.name, "Maria Souza");
    }

    #[test]
    fn state_codes_round_trip() {
        for st in BrState::ALL {
            assert_eq!(st.as_str().parse::<BrState>().unwrap(), st);
        }
        assert!("XX".parse::<BrState>().is_err());
        assert!("sp".parse::<BrState>().is_err());
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&CollaboratorStatus::Suspended).unwrap(),
            "\"suspended\""
        );
        assert_eq!(
            serde_json::to_string(&BankAccountType::Checking).unwrap(),
            "\"checking\""
        );
        assert_eq!(serde_json::to_string(&PixKeyType::Random).unwrap(), "\"random\"");
        assert_eq!(serde_json::to_string(&BrState::SP).unwrap(), "\"SP\"");
    }
}
