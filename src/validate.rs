//! Field validators for the registration form.
//!
//! Every check is pure and total: expected-invalid input yields a verdict,
//! never an error. The per-field messages are the fixed set shown by the
//! form; phone normalization lives in [`crate::phone`].

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MSG_FULL_NAME: &str = "الاسم مطلوب (على الأقل حرفين).";
pub const MSG_PHONE: &str = "أدخل رقم جوال سعودي صحيح (مثل 05XXXXXXXX).";
pub const MSG_EMAIL: &str = "أدخل بريدًا إلكترونيًا صحيحًا.";
pub const MSG_PASSWORD: &str = "كلمة المرور ضعيفة. جرّب إضافة أرقام/رموز أكثر.";
pub const MSG_ROLE: &str = "اختر نوع الحساب للمتابعة.";
pub const MSG_TERMS: &str = "لازم توافق على الشروط والخصوصية لإكمال التسجيل.";
pub const MSG_OTP_MALFORMED: &str = "أدخل رمزًا صحيحًا مكونًا من 6 أرقام.";
pub const MSG_OTP_REJECTED: &str = "رمز التحقق غير صحيح. حاول مرة أخرى.";

/// Account type selected on the registration form. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Provider,
}

impl Role {
    /// Parse a form value into a role. Unknown or empty values are `None`.
    pub fn parse(s: &str) -> Option<Role> {
        match s.trim() {
            "customer" => Some(Role::Customer),
            "provider" => Some(Role::Provider),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Provider => "provider",
        }
    }
}

/// Form field identifiers, serialized with the names the form uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Phone,
    Email,
    Password,
    Role,
    Terms,
    Otp,
}

/// A single failed field check with its display message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// The set of failing fields from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed for {} field(s)", self.errors.len())
    }
}

/// Trimmed length in [2, 200].
pub fn full_name_ok(s: &str) -> bool {
    let len = s.trim().chars().count();
    (2..=200).contains(&len)
}

/// Empty is valid (the field is optional). Non-empty must look like
/// `local@domain.tld`. UI-level sanity check only, not authoritative.
pub fn email_ok(s: &str) -> bool {
    let v = s.trim().to_lowercase();
    if v.is_empty() {
        return true;
    }

    let run_ok = |p: &str| !p.is_empty() && !p.chars().any(|c| c.is_whitespace() || c == '@');

    let Some((local, domain)) = v.split_once('@') else {
        return false;
    };
    if !run_ok(local) || !run_ok(domain) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.chars().count() >= 2,
        None => false,
    }
}

/// Strength score in [0, 4]: one point each for length >= 10, a letter,
/// a digit, and a non-alphanumeric character.
pub fn password_score(s: &str) -> u8 {
    let mut score = 0;
    if s.chars().count() >= 10 {
        score += 1;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        score += 1;
    }
    if s.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if s.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }
    score
}

pub fn password_acceptable(s: &str) -> bool {
    password_score(s) >= 3
}

/// True iff the selected value is a member of the role set.
pub fn role_ok(selected: &str) -> bool {
    Role::parse(selected).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_bounds() {
        assert!(!full_name_ok(""));
        assert!(!full_name_ok("  a  "));
        assert!(full_name_ok("ab"));
        assert!(full_name_ok("Sara Ali"));
        assert!(full_name_ok(&"x".repeat(200)));
        assert!(!full_name_ok(&"x".repeat(201)));
        // Surrounding whitespace does not count toward the length.
        assert!(full_name_ok(&format!("  {}  ", "x".repeat(200))));
    }

    #[test]
    fn test_email_optional() {
        assert!(email_ok(""));
        assert!(email_ok("   "));
    }

    #[test]
    fn test_email_shapes() {
        assert!(email_ok("sara@example.com"));
        assert!(email_ok("  SARA@Example.COM  "));
        assert!(email_ok("a.b+c@mail.example.sa"));

        assert!(!email_ok("no-at-sign"));
        assert!(!email_ok("@example.com"));
        assert!(!email_ok("sara@"));
        assert!(!email_ok("sara@example"));
        assert!(!email_ok("sara@example.c"));
        assert!(!email_ok("sara@.com"));
        assert!(!email_ok("sa ra@example.com"));
        assert!(!email_ok("sara@@example.com"));
    }

    #[test]
    fn test_password_score_components() {
        assert_eq!(password_score(""), 0);
        assert_eq!(password_score("abc"), 1); // letter only
        assert_eq!(password_score("abc1"), 2); // letter + digit
        assert_eq!(password_score("abc1!"), 3); // + symbol
        assert_eq!(password_score("Abcdefghij1!"), 4); // + length
    }

    #[test]
    fn test_password_score_monotonic_as_strengthened() {
        // Growing a weak password into a strong one never lowers the score.
        let steps = ["a", "abc", "abc1", "abc1!", "abcdefgh1!", "Abcdefghij1!"];
        let mut prev = 0;
        for step in steps {
            let score = password_score(step);
            assert!(score >= prev, "score dropped at {:?}", step);
            prev = score;
        }
    }

    #[test]
    fn test_password_acceptable() {
        assert!(!password_acceptable(""));
        assert!(!password_acceptable("abc1"));
        assert!(password_acceptable("Abcdefghij1!"));
        assert!(password_acceptable("abcdefghij1")); // length + letter + digit
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("provider"), Some(Role::Provider));
        assert_eq!(Role::parse(" customer "), Some(Role::Customer));
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("admin"), None);
        assert!(role_ok("provider"));
        assert!(!role_ok(""));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Provider).unwrap(), "\"provider\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"customer\"").unwrap(),
            Role::Customer
        );
    }

    #[test]
    fn test_validation_errors_collection() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.push(Field::Phone, MSG_PHONE);
        errors.push(Field::Terms, MSG_TERMS);

        assert_eq!(errors.len(), 2);
        assert!(errors.contains(Field::Phone));
        assert!(!errors.contains(Field::Email));
    }

    #[test]
    fn test_field_serialization_matches_form_names() {
        let json = serde_json::to_string(&Field::FullName).unwrap();
        assert_eq!(json, "\"fullName\"");
    }
}
