use serde::Deserialize;

/// Sign-up body. Fields are optional so that absence can be reported with
/// the field-specific message instead of a generic decode failure.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Field checks run before any persistence call. Returns the first
/// violation as a client-facing message.
pub fn validate_sign_up(req: &SignUpRequest) -> Result<(&str, &str), String> {
    let name = req.name.as_deref().ok_or("name was not provided")?;
    if name.is_empty() || name.len() > 100 {
        return Err("name length should be at least 1 and no more than 100 characters".into());
    }
    let password = req.password.as_deref().ok_or("password was not provided")?;
    if password.is_empty() || password.len() > 100 {
        return Err("pass length should be at least 1 and no more than 100 characters".into());
    }
    Ok((name, password))
}
