//! Numbered menu commands.

pub const MENU_TEXT: &str = "\nВыберите команду:
1. Просмотр всех записей
2. Поиск записи
3. Добавление записи
4. Удаление записи
5. Изменение записи
6. Вывод возраста записи
7. Выход";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    List,
    Search,
    Add,
    Delete,
    Update,
    Age,
    Exit,
}

impl MenuCommand {
    /// Parses a trimmed menu number; anything else is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::List),
            "2" => Some(Self::Search),
            "3" => Some(Self::Add),
            "4" => Some(Self::Delete),
            "5" => Some(Self::Update),
            "6" => Some(Self::Age),
            "7" => Some(Self::Exit),
            _ => None,
        }
    }

    /// Metadata label for log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Search => "search",
            Self::Add => "add",
            Self::Delete => "delete",
            Self::Update => "update",
            Self::Age => "age",
            Self::Exit => "exit",
        }
    }
}
