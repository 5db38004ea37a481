//! Interactive command loop.
//!
//! # Responsibility
//! - Re-print the menu, read a command and dispatch it to the directory
//!   service until the user exits or input ends.
//! - Turn every operation failure into a console message.
//!
//! # Invariants
//! - Operation errors never end the loop; only I/O errors on the console do.
//! - End of input behaves like the exit command.

use crate::console::Console;
use crate::menu::{MenuCommand, MENU_TEXT};
use log::info;
use phonebook_core::{
    normalize_birth_date, normalize_name, validate_phone, DirectoryService, DirectoryStore,
    Record, RecordField, DATE_FORMAT_HINT,
};
use std::io::{self, BufRead, Write};

enum Flow {
    Continue,
    Exit,
}

/// Command loop state: the directory service and the console.
pub struct Session<S: DirectoryStore, R, W> {
    service: DirectoryService<S>,
    console: Console<R, W>,
}

impl<S: DirectoryStore, R: BufRead, W: Write> Session<S, R, W> {
    pub fn new(service: DirectoryService<S>, console: Console<R, W>) -> Self {
        Self { service, console }
    }

    /// Runs until command 7 or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.console.say(MENU_TEXT)?;
            let Some(line) = self.console.prompt("Введите номер команды: ")? else {
                break;
            };

            let Some(command) = MenuCommand::parse(&line) else {
                self.console.say("\nНеверная команда. Попробуйте снова.\n")?;
                continue;
            };
            info!("event=menu_command module=cli command={}", command.as_str());

            let flow = match command {
                MenuCommand::List => self.list()?,
                MenuCommand::Search => self.search()?,
                MenuCommand::Add => self.add()?,
                MenuCommand::Delete => self.delete()?,
                MenuCommand::Update => self.update()?,
                MenuCommand::Age => self.age()?,
                MenuCommand::Exit => Flow::Exit,
            };
            if let Flow::Exit = flow {
                break;
            }
        }

        self.console.say("\nЗавершение работы программы. \n")
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (DirectoryService<S>, Console<R, W>) {
        (self.service, self.console)
    }

    fn list(&mut self) -> io::Result<Flow> {
        let lines: Vec<String> = self
            .service
            .list()
            .into_iter()
            .map(Record::display_line)
            .collect();
        if lines.is_empty() {
            self.console.say("\nСправочник пуст.\n")?;
            return Ok(Flow::Continue);
        }

        self.console.say("\nТекущие записи в справочнике:")?;
        for line in &lines {
            self.console.say(line)?;
        }
        self.console.say("")?;
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> io::Result<Flow> {
        let Some(query) = self
            .console
            .prompt("Введите имя, фамилию или номер для поиска: ")?
        else {
            return Ok(Flow::Exit);
        };

        let lines: Vec<String> = self
            .service
            .search(query.trim())
            .into_iter()
            .map(Record::display_line)
            .collect();
        if lines.is_empty() {
            self.console.say("\nСовпадений не найдено.\n")?;
            return Ok(Flow::Continue);
        }

        self.console.say("\nНайденные записи:")?;
        for line in &lines {
            self.console.say(line)?;
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self) -> io::Result<Flow> {
        let (first_name, last_name) = match self.ask_names("Введите имя: ", "Введите фамилию: ")?
        {
            Ok(names) => names,
            Err(flow) => return Ok(flow),
        };
        match self.service.contains(&first_name, &last_name) {
            Ok(false) => {}
            Ok(true) => {
                self.console
                    .say("\nЗапись с таким именем уже существует.\n")?;
                return Ok(Flow::Continue);
            }
            Err(err) => return self.report(err),
        }

        let Some(phone) = self.console.prompt("Введите номер телефона (11 цифр): ")? else {
            return Ok(Flow::Exit);
        };
        if let Err(err) = validate_phone(&phone) {
            return self.report(err);
        }

        let label = format!("Введите дату рождения ({DATE_FORMAT_HINT}) или оставьте пустым: ");
        let Some(birth_date) = self.console.prompt(&label)? else {
            return Ok(Flow::Exit);
        };
        if let Err(err) = normalize_birth_date(&birth_date) {
            return self.report(err);
        }

        match self
            .service
            .add(&first_name, &last_name, &phone, Some(birth_date.as_str()))
        {
            Ok(_) => self.console.say("\nЗапись успешно добавлена.\n")?,
            Err(err) => return self.report(err),
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> io::Result<Flow> {
        let (first_name, last_name) = match self.ask_names(
            "Введите имя для удаления: ",
            "Введите фамилию для удаления: ",
        )? {
            Ok(names) => names,
            Err(flow) => return Ok(flow),
        };

        match self.service.delete(&first_name, &last_name) {
            Ok(_) => self.console.say("\nЗапись успешно удалена.\n")?,
            Err(err) => return self.report(err),
        }
        Ok(Flow::Continue)
    }

    fn update(&mut self) -> io::Result<Flow> {
        let (first_name, last_name) = match self.ask_names(
            "Введите имя для изменения: ",
            "Введите фамилию для изменения: ",
        )? {
            Ok(names) => names,
            Err(flow) => return Ok(flow),
        };
        match self.service.contains(&first_name, &last_name) {
            Ok(true) => {}
            Ok(false) => {
                self.console.say("\nЗапись не найдена.\n")?;
                return Ok(Flow::Continue);
            }
            Err(err) => return self.report(err),
        }

        let Some(field_input) = self
            .console
            .prompt("Что изменить? (Имя, Фамилия, Телефон, Дата рождения): ")?
        else {
            return Ok(Flow::Exit);
        };
        let Ok(field) = field_input.parse::<RecordField>() else {
            self.console.say("\nНекорректное поле.\n")?;
            return Ok(Flow::Continue);
        };

        let label = match field {
            RecordField::FirstName => "Введите новое имя: ".to_string(),
            RecordField::LastName => "Введите новую фамилию: ".to_string(),
            RecordField::Phone => "Введите новый номер телефона: ".to_string(),
            RecordField::BirthDate => {
                format!("Введите новую дату рождения ({DATE_FORMAT_HINT}): ")
            }
        };
        let Some(new_value) = self.console.prompt(&label)? else {
            return Ok(Flow::Exit);
        };

        match self
            .service
            .update(&first_name, &last_name, &field_input, &new_value)
        {
            Ok(_) => self.console.say("\nЗапись успешно обновлена.\n")?,
            Err(err) => return self.report(err),
        }
        Ok(Flow::Continue)
    }

    fn age(&mut self) -> io::Result<Flow> {
        let (first_name, last_name) = match self.ask_names("Введите имя: ", "Введите фамилию: ")?
        {
            Ok(names) => names,
            Err(flow) => return Ok(flow),
        };

        match self.service.age_of(&first_name, &last_name) {
            Ok(age) => self.console.say(&format!("\nВозраст: {age} лет\n"))?,
            Err(err) => return self.report(err),
        }
        Ok(Flow::Continue)
    }

    /// Reads both names, rejecting a bad first name before the second prompt.
    ///
    /// `Err` carries the flow the caller should return.
    fn ask_names(
        &mut self,
        first_label: &str,
        last_label: &str,
    ) -> io::Result<Result<(String, String), Flow>> {
        let Some(first_name) = self.console.prompt(first_label)? else {
            return Ok(Err(Flow::Exit));
        };
        let first_name = match normalize_name(&first_name) {
            Ok(name) => name,
            Err(err) => return self.report(err).map(Err),
        };
        let Some(last_name) = self.console.prompt(last_label)? else {
            return Ok(Err(Flow::Exit));
        };
        Ok(Ok((first_name, last_name)))
    }

    fn report(&mut self, err: impl std::fmt::Display) -> io::Result<Flow> {
        self.console.say(&format!("\n{err}\n"))?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::console::Console;
    use phonebook_core::{DirectoryService, DirectoryStore, JsonFileStore, RecordId};
    use tempfile::TempDir;

    fn run_script(temp: &TempDir, script: &str) -> String {
        let store = JsonFileStore::new(temp.path().join("phone_directory.json"));
        let service = DirectoryService::open(store).unwrap();
        let console = Console::new(script.as_bytes(), Vec::new());
        let mut session = Session::new(service, console);
        session.run().unwrap();

        let (_, console) = session.into_parts();
        String::from_utf8(console.into_output()).unwrap()
    }

    fn stored(temp: &TempDir) -> phonebook_core::Directory {
        JsonFileStore::new(temp.path().join("phone_directory.json"))
            .load()
            .unwrap()
    }

    #[test]
    fn empty_list_then_exit() {
        let temp = tempfile::tempdir().unwrap();
        let output = run_script(&temp, "1\n7\n");

        assert!(output.contains("Справочник пуст."));
        assert!(output.contains("Завершение работы программы."));
        assert_eq!(output.matches("Выберите команду:").count(), 2);
    }

    #[test]
    fn invalid_command_redisplays_menu() {
        let temp = tempfile::tempdir().unwrap();
        let output = run_script(&temp, "9\nabc\n7\n");

        assert_eq!(output.matches("Неверная команда. Попробуйте снова.").count(), 2);
        assert_eq!(output.matches("Выберите команду:").count(), 3);
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let temp = tempfile::tempdir().unwrap();
        let output = run_script(&temp, "3\njohn\n");

        assert!(output.contains("Завершение работы программы."));
        assert!(stored(&temp).is_empty());
    }

    #[test]
    fn add_list_and_age_flow() {
        let temp = tempfile::tempdir().unwrap();
        let output = run_script(
            &temp,
            "3\njohn\nsmith\n+79991234567\n15.05.1990\n1\n6\njohn\nsmith\n7\n",
        );

        assert!(output.contains("Запись успешно добавлена."));
        assert!(output.contains("John Smith | Телефон: 89991234567 | Дата рождения: 15.05.1990"));
        assert!(output.contains("Возраст: "));

        let directory = stored(&temp);
        assert!(directory.contains(&RecordId::new("John", "Smith")));
    }

    #[test]
    fn add_duplicate_stops_before_phone_prompt() {
        let temp = tempfile::tempdir().unwrap();
        let output = run_script(
            &temp,
            "3\njohn\nsmith\n89991234567\n\n3\nJOHN\nSMITH\n7\n",
        );

        assert!(output.contains("Запись с таким именем уже существует."));
        assert_eq!(output.matches("Введите номер телефона").count(), 1);
    }

    #[test]
    fn add_reports_invalid_inputs() {
        let temp = tempfile::tempdir().unwrap();
        let output = run_script(
            &temp,
            "3\nj@ne\n3\njane\ndoe\n123\n3\njane\ndoe\n89990000000\n30.02.2000\n7\n",
        );

        assert!(output.contains("Имя и фамилия могут содержать только буквы, цифры и пробелы."));
        assert!(output.contains("Неверный формат номера телефона."));
        assert!(output.contains("Неверный формат даты рождения."));
        assert!(stored(&temp).is_empty());
    }

    #[test]
    fn search_update_delete_flow() {
        let temp = tempfile::tempdir().unwrap();
        let output = run_script(
            &temp,
            "3\njohn\nsmith\n89991234567\n\n\
             2\nJohn\n\
             5\njohn\nsmith\nТелефон\n89997654321\n\
             2\n89997654321\n\
             4\njohn\nsmith\n\
             2\nJohn\n\
             7\n",
        );

        assert_eq!(output.matches("Найденные записи:").count(), 2);
        assert!(output.contains("Запись успешно обновлена."));
        assert!(output.contains("John Smith | Телефон: 89997654321 | Дата рождения: Не указана"));
        assert!(output.contains("Запись успешно удалена."));
        assert!(output.contains("Совпадений не найдено."));
        assert!(stored(&temp).is_empty());
    }

    #[test]
    fn update_reports_missing_record_and_bad_field() {
        let temp = tempfile::tempdir().unwrap();
        let output = run_script(
            &temp,
            "5\nghost\nuser\n3\njohn\nsmith\n89991234567\n\n5\njohn\nsmith\nemail\n7\n",
        );

        assert!(output.contains("Запись не найдена."));
        assert!(output.contains("Некорректное поле."));
    }

    #[test]
    fn age_without_birth_date_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        let output = run_script(&temp, "3\njohn\nsmith\n89991234567\n\n6\njohn\nsmith\n7\n");

        assert!(output.contains("Дата рождения не указана."));
    }

    #[test]
    fn invalid_first_name_is_rejected_before_last_name_prompt() {
        let temp = tempfile::tempdir().unwrap();
        let output = run_script(&temp, "3\nj@ne\n4\n!\n5\n\n6\nj.r\n7\n");

        assert_eq!(
            output
                .matches("Имя и фамилия могут содержать только буквы, цифры и пробелы.")
                .count(),
            3
        );
        assert!(output.contains("Имя и фамилия не могут быть пустыми."));
        assert!(!output.contains("Введите фамилию"));
        assert!(!output.contains("Неверная команда"));
    }
}
