/// All localized strings of the admin area for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminStrings {
    // ==================== Shell ====================
    pub nav_dashboard: &'static str,
    pub nav_projects: &'static str,
    pub nav_logout: &'static str,
    pub loading: &'static str,

    // ==================== Login ====================
    pub login_title: &'static str,
    pub login_username: &'static str,
    pub login_password: &'static str,
    pub login_submit: &'static str,
    pub login_invalid: &'static str,

    // ==================== Projects ====================
    pub projects_title: &'static str,
    pub projects_empty: &'static str,
    pub project_create: &'static str,
    pub project_edit: &'static str,
    pub project_delete: &'static str,
    /// Placeholders: {title}
    pub project_delete_confirm: &'static str,
    pub project_saved: &'static str,
    pub project_deleted: &'static str,
    /// Placeholders: {error}
    pub project_error: &'static str,

    // ==================== Forms ====================
    pub field_title: &'static str,
    pub field_description: &'static str,
    pub field_image: &'static str,
    pub field_published: &'static str,
    pub save: &'static str,
    pub cancel: &'static str,

    // ==================== Live updates ====================
    pub live_connected: &'static str,
    pub live_disconnected: &'static str,
}

impl AdminStrings {
    /// Every `(key, text)` pair, in declaration order.
    pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("nav_dashboard", self.nav_dashboard),
            ("nav_projects", self.nav_projects),
            ("nav_logout", self.nav_logout),
            ("loading", self.loading),
            ("login_title", self.login_title),
            ("login_username", self.login_username),
            ("login_password", self.login_password),
            ("login_submit", self.login_submit),
            ("login_invalid", self.login_invalid),
            ("projects_title", self.projects_title),
            ("projects_empty", self.projects_empty),
            ("project_create", self.project_create),
            ("project_edit", self.project_edit),
            ("project_delete", self.project_delete),
            ("project_delete_confirm", self.project_delete_confirm),
            ("project_saved", self.project_saved),
            ("project_deleted", self.project_deleted),
            ("project_error", self.project_error),
            ("field_title", self.field_title),
            ("field_description", self.field_description),
            ("field_image", self.field_image),
            ("field_published", self.field_published),
            ("save", self.save),
            ("cancel", self.cancel),
            ("live_connected", self.live_connected),
            ("live_disconnected", self.live_disconnected),
        ]
    }
}

// ==================== Uzbek (Cyrillic) Strings ====================

/// Uzbek strings in Cyrillic script (canonical for the admin area)
pub const ADMIN_UZBEK_CYRILLIC_STRINGS: AdminStrings = AdminStrings {
    nav_dashboard: "Бошқарув панели",
    nav_projects: "Лойиҳалар",
    nav_logout: "Чиқиш",
    loading: "Юкланмоқда...",

    login_title: "Тизимга кириш",
    login_username: "Фойдаланувчи номи",
    login_password: "Парол",
    login_submit: "Кириш",
    login_invalid: "Логин ёки парол нотўғри",

    projects_title: "Лойиҳалар",
    projects_empty: "Ҳали лойиҳалар йўқ",
    project_create: "Лойиҳа қўшиш",
    project_edit: "Таҳрирлаш",
    project_delete: "Ўчириш",
    project_delete_confirm: "«{title}» лойиҳасини ўчирасизми?",
    project_saved: "Лойиҳа сақланди",
    project_deleted: "Лойиҳа ўчирилди",
    project_error: "Хатолик: {error}",

    field_title: "Номи",
    field_description: "Тавсиф",
    field_image: "Расм",
    field_published: "Сайтда кўрсатиш",
    save: "Сақлаш",
    cancel: "Бекор қилиш",

    live_connected: "Жонли янгиланишлар уланган",
    live_disconnected: "Жонли янгиланишлар узилган",
};

// ==================== Russian Strings ====================

pub const ADMIN_RUSSIAN_STRINGS: AdminStrings = AdminStrings {
    nav_dashboard: "Панель управления",
    nav_projects: "Проекты",
    nav_logout: "Выйти",
    loading: "Загрузка...",

    login_title: "Вход в систему",
    login_username: "Имя пользователя",
    login_password: "Пароль",
    login_submit: "Войти",
    login_invalid: "Неверный логин или пароль",

    projects_title: "Проекты",
    projects_empty: "Проектов пока нет",
    project_create: "Добавить проект",
    project_edit: "Редактировать",
    project_delete: "Удалить",
    project_delete_confirm: "Удалить проект «{title}»?",
    project_saved: "Проект сохранён",
    project_deleted: "Проект удалён",
    project_error: "Ошибка: {error}",

    field_title: "Название",
    field_description: "Описание",
    field_image: "Изображение",
    field_published: "Показывать на сайте",
    save: "Сохранить",
    cancel: "Отмена",

    live_connected: "Обновления в реальном времени подключены",
    live_disconnected: "Обновления в реальном времени отключены",
};
