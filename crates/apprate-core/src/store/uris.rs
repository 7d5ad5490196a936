//! Store package names and listing URI templates.

/// Google Play store app package.
pub const GOOGLE_PLAY_PACKAGE: &str = "com.android.vending";
/// Amazon Appstore app package.
pub const AMAZON_APPSTORE_PACKAGE: &str = "com.amazon.venezia";
/// Samsung Galaxy Apps app package.
pub const SAMSUNG_GALAXY_APPS_PACKAGE: &str = "com.sec.android.app.samsungapps";

pub fn google_play(package: &str) -> String {
    format!("market://details?id={}", package)
}

pub fn google_play_web(package: &str) -> String {
    format!("https://play.google.com/store/apps/details?id={}", package)
}

pub fn amazon_appstore(package: &str) -> String {
    format!("amzn://apps/android?p={}", package)
}

pub fn amazon_appstore_web(package: &str) -> String {
    format!("https://www.amazon.com/gp/mas/dl/android?p={}", package)
}

pub fn samsung_galaxy_apps(package: &str) -> String {
    format!("samsungapps://ProductDetail/{}", package)
}

pub fn samsung_galaxy_apps_web(package: &str) -> String {
    format!("https://apps.samsung.com/appquery/appDetail.as?appId={}", package)
}

pub fn apple_app_store(application_id: u64) -> String {
    format!("https://itunes.apple.com/app/id{}", application_id)
}

pub fn blackberry_world(application_id: u64) -> String {
    format!("https://appworld.blackberry.com/webstore/content/{}", application_id)
}

pub fn cafe_bazaar(package: &str) -> String {
    format!("bazaar://details?id={}", package)
}

/// Generic market scheme understood by most Chinese stores.
pub fn chinese_stores(package: &str) -> String {
    format!("market://details?id={}", package)
}

pub fn mi_appstore(package: &str) -> String {
    format!("mimarket://details?id={}", package)
}

pub fn slideme(package: &str) -> String {
    format!("sam://details?id={}", package)
}

pub fn tencent_app_store(package: &str) -> String {
    format!("https://a.app.qq.com/o/simple.jsp?pkgname={}", package)
}

pub fn yandex_store(package: &str) -> String {
    format!("yastore://details?id={}", package)
}
