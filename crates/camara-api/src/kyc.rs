//! Know Your Customer APIs.
//!
//! - `kyc-match/v0.3`: compare customer data against the operator's records;
//! - `kyc-age-verification/v0.1`: check an age threshold without revealing the birthdate;
//! - `kyc-fill-in/v0.4`: fetch the operator's records to prefill a form;
//! - `kyc-tenure/v0.1`: check how long a line has been with the operator.

use chrono::NaiveDate;
use reqwest::Method;

use crate::request::Operation;
use crate::{CamaraClient, Error};

// ── Enums ───────────────────────────────────────────────────────────

api_enum! {
    /// Outcome of a single attribute comparison.
    pub enum MatchResult {
        True = "true",
        False = "false",
        NotAvailable = "not_available",
    }
}

api_enum! {
    /// Outcome of an age threshold check.
    pub enum AgeCheck {
        True = "true",
        False = "false",
        NotAvailable = "not_available",
    }
}

api_enum! {
    pub enum Gender {
        Male = "MALE",
        Female = "FEMALE",
        Other = "OTHER",
    }
}

api_enum! {
    pub enum ContractType {
        /// Pay as you go (prepaid).
        Payg = "PAYG",
        /// Pay monthly (postpaid).
        Paym = "PAYM",
        Business = "Business",
    }
}

// ── Match ───────────────────────────────────────────────────────────

model! {
    /// Customer data to compare. Only the supplied attributes are checked.
    pub struct KycMatchParams / KycMatchParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            phone_number / with_phone_number: String = "phoneNumber",
            id_document / with_id_document: String = "idDocument",
            name / with_name: String = "name",
            given_name / with_given_name: String = "givenName",
            family_name / with_family_name: String = "familyName",
            name_kana_hankaku / with_name_kana_hankaku: String = "nameKanaHankaku",
            name_kana_zenkaku / with_name_kana_zenkaku: String = "nameKanaZenkaku",
            middle_names / with_middle_names: String = "middleNames",
            family_name_at_birth / with_family_name_at_birth: String = "familyNameAtBirth",
            address / with_address: String = "address",
            street_name / with_street_name: String = "streetName",
            street_number / with_street_number: String = "streetNumber",
            postal_code / with_postal_code: String = "postalCode",
            region / with_region: String = "region",
            locality / with_locality: String = "locality",
            country / with_country: String = "country",
            house_number_extension / with_house_number_extension: String = "houseNumberExtension",
            birthdate / with_birthdate: NaiveDate = "birthdate",
            email / with_email: String = "email",
            gender / with_gender: Gender = "gender",
        }
    }
}

impl Operation for KycMatchParams {
    type Response = KycMatch;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "kyc-match/v0.3/match";
}

model! {
    /// Per-attribute results. A `*_score` (0-100) accompanies a `false`
    /// match on free-text attributes.
    pub struct KycMatch / KycMatchBuilder {
        required {}
        optional {
            id_document_match / with_id_document_match: MatchResult = "idDocumentMatch",
            name_match / with_name_match: MatchResult = "nameMatch",
            name_match_score / with_name_match_score: i32 = "nameMatchScore",
            given_name_match / with_given_name_match: MatchResult = "givenNameMatch",
            given_name_match_score / with_given_name_match_score: i32 = "givenNameMatchScore",
            family_name_match / with_family_name_match: MatchResult = "familyNameMatch",
            family_name_match_score / with_family_name_match_score: i32 = "familyNameMatchScore",
            name_kana_hankaku_match / with_name_kana_hankaku_match: MatchResult = "nameKanaHankakuMatch",
            name_kana_zenkaku_match / with_name_kana_zenkaku_match: MatchResult = "nameKanaZenkakuMatch",
            middle_names_match / with_middle_names_match: MatchResult = "middleNamesMatch",
            family_name_at_birth_match / with_family_name_at_birth_match: MatchResult = "familyNameAtBirthMatch",
            address_match / with_address_match: MatchResult = "addressMatch",
            address_match_score / with_address_match_score: i32 = "addressMatchScore",
            street_name_match / with_street_name_match: MatchResult = "streetNameMatch",
            street_number_match / with_street_number_match: MatchResult = "streetNumberMatch",
            postal_code_match / with_postal_code_match: MatchResult = "postalCodeMatch",
            region_match / with_region_match: MatchResult = "regionMatch",
            locality_match / with_locality_match: MatchResult = "localityMatch",
            country_match / with_country_match: MatchResult = "countryMatch",
            house_number_extension_match / with_house_number_extension_match: MatchResult = "houseNumberExtensionMatch",
            birthdate_match / with_birthdate_match: MatchResult = "birthdateMatch",
            email_match / with_email_match: MatchResult = "emailMatch",
            email_match_score / with_email_match_score: i32 = "emailMatchScore",
            gender_match / with_gender_match: MatchResult = "genderMatch",
        }
    }
}

// ── Age verification ────────────────────────────────────────────────

model! {
    pub struct VerifyAgeParams / VerifyAgeParamsBuilder {
        required {
            /// Age in years the subscriber must have reached.
            age_threshold / with_age_threshold: i32 = "ageThreshold",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            phone_number / with_phone_number: String = "phoneNumber",
            id_document / with_id_document: String = "idDocument",
            name / with_name: String = "name",
            given_name / with_given_name: String = "givenName",
            family_name / with_family_name: String = "familyName",
            middle_names / with_middle_names: String = "middleNames",
            family_name_at_birth / with_family_name_at_birth: String = "familyNameAtBirth",
            birthdate / with_birthdate: NaiveDate = "birthdate",
            email / with_email: String = "email",
            include_content_lock / with_include_content_lock: bool = "includeContentLock",
            include_parental_control / with_include_parental_control: bool = "includeParentalControl",
        }
    }
}

impl Operation for VerifyAgeParams {
    type Response = AgeVerification;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "kyc-age-verification/v0.1/verify";
}

model! {
    pub struct AgeVerification / AgeVerificationBuilder {
        required {
            age_check / with_age_check: AgeCheck = "ageCheck",
        }
        optional {
            /// Whether the operator verified the subscriber's identity documents.
            verified_status / with_verified_status: bool = "verifiedStatus",
            /// 0-100 confidence that the supplied identity data matches.
            identity_match_score / with_identity_match_score: i32 = "identityMatchScore",
            content_lock / with_content_lock: MatchResult = "contentLock",
            parental_control / with_parental_control: MatchResult = "parentalControl",
        }
    }
}

// ── Fill-in ─────────────────────────────────────────────────────────

model! {
    pub struct KycFillInParams / KycFillInParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            phone_number / with_phone_number: String = "phoneNumber",
        }
    }
}

impl Operation for KycFillInParams {
    type Response = KycFillIn;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "kyc-fill-in/v0.4/fill-in";
}

model! {
    /// Subscriber data held by the operator. Every attribute is optional.
    pub struct KycFillIn / KycFillInBuilder {
        required {}
        optional {
            phone_number / with_phone_number: String = "phoneNumber",
            id_document / with_id_document: String = "idDocument",
            id_document_type / with_id_document_type: String = "idDocumentType",
            id_document_expiry_date / with_id_document_expiry_date: NaiveDate = "idDocumentExpiryDate",
            name / with_name: String = "name",
            given_name / with_given_name: String = "givenName",
            family_name / with_family_name: String = "familyName",
            name_kana_hankaku / with_name_kana_hankaku: String = "nameKanaHankaku",
            name_kana_zenkaku / with_name_kana_zenkaku: String = "nameKanaZenkaku",
            middle_names / with_middle_names: String = "middleNames",
            family_name_at_birth / with_family_name_at_birth: String = "familyNameAtBirth",
            address / with_address: String = "address",
            street_name / with_street_name: String = "streetName",
            street_number / with_street_number: String = "streetNumber",
            postal_code / with_postal_code: String = "postalCode",
            region / with_region: String = "region",
            locality / with_locality: String = "locality",
            country / with_country: String = "country",
            house_number_extension / with_house_number_extension: String = "houseNumberExtension",
            birthdate / with_birthdate: NaiveDate = "birthdate",
            email / with_email: String = "email",
            gender / with_gender: Gender = "gender",
            city_of_birth / with_city_of_birth: String = "cityOfBirth",
            country_of_birth / with_country_of_birth: String = "countryOfBirth",
            nationality / with_nationality: String = "nationality",
        }
    }
}

// ── Tenure ──────────────────────────────────────────────────────────

model! {
    pub struct CheckTenureParams / CheckTenureParamsBuilder {
        required {
            /// The line must have been active since this date.
            tenure_date / with_tenure_date: NaiveDate = "tenureDate",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            phone_number / with_phone_number: String = "phoneNumber",
        }
    }
}

impl Operation for CheckTenureParams {
    type Response = TenureCheck;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "kyc-tenure/v0.1/check-tenure";
}

model! {
    pub struct TenureCheck / TenureCheckBuilder {
        required {
            tenure_date_check / with_tenure_date_check: bool = "tenureDateCheck",
        }
        optional {
            contract_type / with_contract_type: ContractType = "contractType",
        }
    }
}

// ── Service ─────────────────────────────────────────────────────────

pub struct KycService<'a> {
    client: &'a CamaraClient,
}

impl CamaraClient {
    pub fn kyc(&self) -> KycService<'_> {
        KycService { client: self }
    }
}

impl KycService<'_> {
    pub async fn match_identity(&self, params: &KycMatchParams) -> Result<KycMatch, Error> {
        self.client.execute(params).await
    }

    pub async fn verify_age(&self, params: &VerifyAgeParams) -> Result<AgeVerification, Error> {
        self.client.execute(params).await
    }

    pub async fn fill_in(&self, phone_number: Option<String>) -> Result<KycFillIn, Error> {
        let params = KycFillInParams {
            phone_number,
            ..KycFillInParams::new()
        };
        self.client.execute(&params).await
    }

    pub async fn check_tenure(
        &self,
        phone_number: Option<String>,
        tenure_date: NaiveDate,
    ) -> Result<TenureCheck, Error> {
        let params = CheckTenureParams {
            phone_number,
            ..CheckTenureParams::new(tenure_date)
        };
        self.client.execute(&params).await
    }
}
