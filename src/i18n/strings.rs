/// All localized strings of the public site for one language
///
/// Placeholders use `{name}` syntax and must match across languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteStrings {
    // ==================== Navigation ====================
    pub nav_home: &'static str,
    pub nav_about: &'static str,
    pub nav_floor_plans: &'static str,
    pub nav_gallery: &'static str,
    pub nav_location: &'static str,
    pub nav_contact: &'static str,

    // ==================== Hero ====================
    /// Main headline of the landing page
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    /// Call-to-action button in the hero section
    pub hero_cta: &'static str,

    // ==================== About ====================
    pub about_title: &'static str,
    pub about_text: &'static str,

    // ==================== Floor Plans ====================
    pub floor_plans_title: &'static str,
    /// Placeholders: {count}
    pub floor_plan_rooms: &'static str,
    /// Placeholders: {area}
    pub floor_plan_area: &'static str,
    pub floor_plan_request: &'static str,

    // ==================== Gallery / Location ====================
    pub gallery_title: &'static str,
    pub location_title: &'static str,
    pub location_address: &'static str,

    // ==================== Projects ====================
    pub projects_title: &'static str,
    pub projects_empty: &'static str,
    pub projects_loading: &'static str,
    pub projects_error: &'static str,

    // ==================== Contact ====================
    pub contact_title: &'static str,
    pub contact_name: &'static str,
    pub contact_phone: &'static str,
    pub contact_message: &'static str,
    pub contact_submit: &'static str,
    pub contact_success: &'static str,

    // ==================== Footer ====================
    /// Placeholders: {year}
    pub footer_rights: &'static str,
}

impl SiteStrings {
    /// Every `(key, text)` pair, in declaration order.
    pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("nav_home", self.nav_home),
            ("nav_about", self.nav_about),
            ("nav_floor_plans", self.nav_floor_plans),
            ("nav_gallery", self.nav_gallery),
            ("nav_location", self.nav_location),
            ("nav_contact", self.nav_contact),
            ("hero_title", self.hero_title),
            ("hero_subtitle", self.hero_subtitle),
            ("hero_cta", self.hero_cta),
            ("about_title", self.about_title),
            ("about_text", self.about_text),
            ("floor_plans_title", self.floor_plans_title),
            ("floor_plan_rooms", self.floor_plan_rooms),
            ("floor_plan_area", self.floor_plan_area),
            ("floor_plan_request", self.floor_plan_request),
            ("gallery_title", self.gallery_title),
            ("location_title", self.location_title),
            ("location_address", self.location_address),
            ("projects_title", self.projects_title),
            ("projects_empty", self.projects_empty),
            ("projects_loading", self.projects_loading),
            ("projects_error", self.projects_error),
            ("contact_title", self.contact_title),
            ("contact_name", self.contact_name),
            ("contact_phone", self.contact_phone),
            ("contact_message", self.contact_message),
            ("contact_submit", self.contact_submit),
            ("contact_success", self.contact_success),
            ("footer_rights", self.footer_rights),
        ]
    }
}

// ==================== Russian Strings ====================

/// Russian strings (canonical)
pub const RUSSIAN_STRINGS: SiteStrings = SiteStrings {
    nav_home: "Главная",
    nav_about: "О проекте",
    nav_floor_plans: "Планировки",
    nav_gallery: "Галерея",
    nav_location: "Расположение",
    nav_contact: "Контакты",

    hero_title: "Жилой комплекс в самом сердце Ташкента",
    hero_subtitle: "Современные квартиры с продуманными планировками и закрытой территорией",
    hero_cta: "Оставить заявку",

    about_title: "О проекте",
    about_text: "Монолитные дома комфорт-класса, подземный паркинг, детские и спортивные площадки во дворе без машин.",

    floor_plans_title: "Планировки квартир",
    floor_plan_rooms: "Комнат: {count}",
    floor_plan_area: "Площадь: {area} м²",
    floor_plan_request: "Узнать цену",

    gallery_title: "Галерея",
    location_title: "Расположение",
    location_address: "г. Ташкент, Мирзо-Улугбекский район",

    projects_title: "Наши проекты",
    projects_empty: "Проекты скоро появятся",
    projects_loading: "Загрузка...",
    projects_error: "Не удалось загрузить проекты",

    contact_title: "Свяжитесь с нами",
    contact_name: "Ваше имя",
    contact_phone: "Номер телефона",
    contact_message: "Сообщение",
    contact_submit: "Отправить",
    contact_success: "Спасибо! Мы свяжемся с вами в ближайшее время.",

    footer_rights: "© {year} Все права защищены",
};

// ==================== Uzbek Strings ====================

/// Uzbek strings (Latin script)
pub const UZBEK_STRINGS: SiteStrings = SiteStrings {
    nav_home: "Bosh sahifa",
    nav_about: "Loyiha haqida",
    nav_floor_plans: "Rejalar",
    nav_gallery: "Galereya",
    nav_location: "Joylashuv",
    nav_contact: "Aloqa",

    hero_title: "Toshkentning qoq markazidagi turar-joy majmuasi",
    hero_subtitle: "Puxta rejalashtirilgan zamonaviy xonadonlar va yopiq hudud",
    hero_cta: "Ariza qoldirish",

    about_title: "Loyiha haqida",
    about_text: "Komfort-klassdagi monolit uylar, yer osti avtoturargohi, mashinasiz hovlida bolalar va sport maydonchalari.",

    floor_plans_title: "Xonadon rejalari",
    floor_plan_rooms: "Xonalar: {count}",
    floor_plan_area: "Maydoni: {area} m²",
    floor_plan_request: "Narxini bilish",

    gallery_title: "Galereya",
    location_title: "Joylashuv",
    location_address: "Toshkent sh., Mirzo Ulug'bek tumani",

    projects_title: "Bizning loyihalar",
    projects_empty: "Loyihalar tez orada paydo bo'ladi",
    projects_loading: "Yuklanmoqda...",
    projects_error: "Loyihalarni yuklab bo'lmadi",

    contact_title: "Biz bilan bog'laning",
    contact_name: "Ismingiz",
    contact_phone: "Telefon raqami",
    contact_message: "Xabar",
    contact_submit: "Yuborish",
    contact_success: "Rahmat! Tez orada siz bilan bog'lanamiz.",

    footer_rights: "© {year} Barcha huquqlar himoyalangan",
};

/// Fill `{name}` placeholders in a localized template.
pub fn format_template(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{}}}", name), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_have_same_keys() {
        let ru: Vec<_> = RUSSIAN_STRINGS.entries().iter().map(|(k, _)| *k).collect();
        let uz: Vec<_> = UZBEK_STRINGS.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(ru, uz);
    }

    #[test]
    fn test_tables_differ() {
        assert_ne!(RUSSIAN_STRINGS.hero_title, UZBEK_STRINGS.hero_title);
        assert_ne!(RUSSIAN_STRINGS.nav_contact, UZBEK_STRINGS.nav_contact);
    }

    #[test]
    fn test_format_template() {
        assert_eq!(
            format_template(RUSSIAN_STRINGS.floor_plan_rooms, &[("count", "3")]),
            "Комнат: 3"
        );
        assert_eq!(
            format_template(UZBEK_STRINGS.footer_rights, &[("year", "2025")]),
            "© 2025 Barcha huquqlar himoyalangan"
        );
    }

    #[test]
    fn test_format_template_leaves_unknown_placeholders() {
        assert_eq!(format_template("{a} {b}", &[("a", "x")]), "x {b}");
    }
}
