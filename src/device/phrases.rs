//! Localized log phrases.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Russian,
}

impl Language {
    pub fn waiting_for_commands(self) -> &'static str {
        match self {
            Self::English => "Waiting for commands...",
            Self::Russian => "Ожидание команд...",
        }
    }

    pub fn sending_impossible(self) -> &'static str {
        match self {
            Self::English => "Sending notifications is impossible",
            Self::Russian => "Отправка СМС уведомлений невозможна",
        }
    }

    pub fn not_started(self) -> &'static str {
        match self {
            Self::English => "Communication line is not started",
            Self::Russian => "Линия связи не запущена",
        }
    }

    pub fn illegal_command(self) -> &'static str {
        match self {
            Self::English => "Illegal command",
            Self::Russian => "Недопустимая команда",
        }
    }

    pub fn incorrect_command_data(self) -> &'static str {
        match self {
            Self::English => "Incorrect command data",
            Self::Russian => "Некорректные данные команды",
        }
    }

    pub fn incorrect_recipients(self) -> &'static str {
        match self {
            Self::English => "Incorrect receivers phone numbers",
            Self::Russian => "Некорректные номера телефонов получателя",
        }
    }

    pub fn message_sent(self, text: &str, sender: &str, phone: &str) -> String {
        match self {
            Self::English => format!("Message '{text}' from '{sender}' is sent to {phone}"),
            Self::Russian => format!("Сообщение '{text}' от '{sender}' отправлено на номер {phone}"),
        }
    }

    pub fn server_response(self, body: &str) -> String {
        match self {
            Self::English => format!("Server response: {body}"),
            Self::Russian => format!("Ответ сервера: {body}"),
        }
    }

    pub fn address_book_missing(self) -> &'static str {
        match self {
            Self::English => "Address book not found, phone numbers are taken from commands",
            Self::Russian => "Адресная книга не найдена, номера телефонов берутся из команд",
        }
    }

    pub fn address_book_error(self, err: &dyn std::fmt::Display) -> String {
        match self {
            Self::English => format!("Error loading address book: {err}"),
            Self::Russian => format!("Ошибка при загрузке адресной книги: {err}"),
        }
    }
}
