//! Localized wording for identity-provider errors

const TRANSLATIONS: &[(&str, &str)] = &[
    ("invalid login credentials", "Неверный email или пароль"),
    ("email not confirmed", "Подтвердите email перед входом"),
    ("user already registered", "Пользователь с таким email уже зарегистрирован"),
    ("already been registered", "Пользователь с таким email уже зарегистрирован"),
    ("password should be at least", "Пароль должен содержать минимум 6 символов"),
    ("unable to validate email address", "Некорректный email"),
    ("invalid email", "Некорректный email"),
    ("signup is disabled", "Регистрация временно отключена"),
    ("email rate limit exceeded", "Слишком много попыток. Попробуйте позже"),
    ("too many requests", "Слишком много попыток. Попробуйте позже"),
    ("jwt expired", "Сессия истекла, войдите снова"),
    ("invalid jwt", "Сессия недействительна, войдите снова"),
    ("user not found", "Пользователь не найден"),
];

const FALLBACK: &str = "Ошибка авторизации. Попробуйте ещё раз";

/// Maps a backend message to user-facing Russian text; unknown messages
/// get a generic fallback
pub fn translate_auth_error(message: &str) -> String {
    let lowered = message.to_lowercase();
    TRANSLATIONS
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, text)| text.to_string())
        .unwrap_or_else(|| FALLBACK.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_messages_are_translated() {
        assert_eq!(
            translate_auth_error("Invalid login credentials"),
            "Неверный email или пароль"
        );
        assert_eq!(
            translate_auth_error("User already registered"),
            "Пользователь с таким email уже зарегистрирован"
        );
    }

    #[test]
    fn unknown_messages_fall_back() {
        assert_eq!(translate_auth_error("boom"), FALLBACK);
    }
}
