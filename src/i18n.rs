//! Localized UI strings (Turkish and English)

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Tr,
    En,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::Tr => "tr",
            Lang::En => "en",
        }
    }

    /// Language name as written into model prompts
    pub fn prompt_name(self) -> &'static str {
        match self {
            Lang::Tr => "Turkish",
            Lang::En => "English",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Lang::Tr => Lang::En,
            Lang::En => Lang::Tr,
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Lang::Tr => &TR,
            Lang::En => &EN,
        }
    }
}

pub struct Strings {
    pub app_title: &'static str,
    pub tagline: &'static str,
    pub hero_title: &'static str,
    pub hero_desc: &'static str,
    pub add_image: &'static str,
    pub product_name_hint: &'static str,
    pub description_hint: &'static str,
    pub tech_docs: &'static str,
    pub add_docs: &'static str,
    pub start_analysis: &'static str,
    pub new_product: &'static str,
    pub reset_confirm: &'static str,
    pub yes: &'static str,
    pub cancel: &'static str,
    pub ok: &'static str,
    pub error_title: &'static str,
    pub ai_working: &'static str,

    // Loading messages
    pub analyzing: &'static str,
    pub studio_lights: &'static str,
    pub pixels_processing: &'static str,
    pub director_chair: &'static str,
    pub preparing_export: &'static str,
    pub video_stage_first: &'static str,
    pub video_stage_extend: &'static str,
    pub video_stage_download: &'static str,
    pub poll_count: &'static str,

    // Alerts and toasts
    pub need_image: &'static str,
    pub analysis_failed: &'static str,
    pub generation_failed: &'static str,
    pub edit_failed: &'static str,
    pub video_failed: &'static str,
    pub export_failed: &'static str,
    pub copy_success: &'static str,
    pub export_saved: &'static str,

    // Gallery and media tools
    pub gallery: &'static str,
    pub generate_image: &'static str,
    pub image_prompt_label: &'static str,
    pub image_prompt_placeholder: &'static str,
    pub image_alt_placeholder: &'static str,
    pub start_production: &'static str,
    pub format: &'static str,
    pub quality: &'static str,
    pub quick_edit: &'static str,
    pub edit_placeholder: &'static str,
    pub apply: &'static str,
    pub download_all: &'static str,
    pub download_image: &'static str,
    pub make_video: &'static str,
    pub video_prompt_label: &'static str,
    pub duration: &'static str,
    pub music: &'static str,
    pub source_image: &'static str,
    pub video_ready: &'static str,
    pub play: &'static str,
    pub save_video: &'static str,
    pub close: &'static str,
    pub product_image: &'static str,
    pub generated_badge: &'static str,

    // Listing card
    pub suggested_price: &'static str,
    pub market_average: &'static str,
    pub product_story: &'static str,
    pub top_features: &'static str,
    pub edit_listing: &'static str,
    pub done: &'static str,
    pub copy: &'static str,
    pub export: &'static str,
    pub export_pdf: &'static str,
    pub export_word: &'static str,
    pub export_html: &'static str,
    pub export_png: &'static str,

    // Field labels used in exports and clipboard text
    pub label_title: &'static str,
    pub label_category: &'static str,
    pub label_price: &'static str,
    pub label_description: &'static str,
    pub label_product_description: &'static str,
    pub label_features: &'static str,
    pub label_key_features: &'static str,
    pub label_tags: &'static str,

    // Error hints
    pub hint_api_key: &'static str,
    pub hint_missing_api_key: &'static str,
    pub hint_quota: &'static str,
    pub hint_network: &'static str,
    pub hint_bad_request: &'static str,
    pub hint_forbidden: &'static str,
    pub hint_not_found: &'static str,
    pub hint_server: &'static str,
    pub hint_other: &'static str,
}

static TR: Strings = Strings {
    app_title: "Ürün Stüdyosu",
    tagline: "E-TİCARET ZEKASI",
    hero_title: "Ürününüzü Yapay Zeka ile Satışa Hazırlayın",
    hero_desc: "Fotoğraflarınızı yükleyin; başlık, açıklama, fiyat önerisi, etiketler, yeni görseller ve tanıtım videosu saniyeler içinde hazır.",
    add_image: "Görsel Ekle",
    product_name_hint: "Ürün adı (isteğe bağlı)",
    description_hint: "Ek açıklama (isteğe bağlı)",
    tech_docs: "Teknik Belgeler",
    add_docs: "Belge Ekle",
    start_analysis: "Analizi Başlat",
    new_product: "Yeni Ürün",
    reset_confirm: "Tüm içerik silinecek. Yeni bir ürüne başlamak istiyor musunuz?",
    yes: "Evet",
    cancel: "İptal",
    ok: "Tamam",
    error_title: "Bir sorun oluştu",
    ai_working: "Yapay Zeka Çalışıyor",

    analyzing: "Ürün analiz ediliyor...",
    studio_lights: "Stüdyo ışıkları hazırlanıyor...",
    pixels_processing: "Pikseller işleniyor...",
    director_chair: "Yönetmen koltuğunda",
    preparing_export: "Dışa aktarım hazırlanıyor...",
    video_stage_first: "İlk sahne çekiliyor",
    video_stage_extend: "Devam sahnesi çekiliyor",
    video_stage_download: "Video indiriliyor",
    poll_count: "kontrol",

    need_image: "Lütfen en az bir resim yükleyin.",
    analysis_failed: "Ürün analiz edilemedi. Lütfen tekrar deneyin.",
    generation_failed: "Varyasyon oluşturulamadı.",
    edit_failed: "Resim düzenlenemedi.",
    video_failed: "Video oluşturulamadı.",
    export_failed: "Dışa aktarım başarısız oldu.",
    copy_success: "İçerik panoya kopyalandı!",
    export_saved: "Kaydedildi",

    gallery: "Galeri",
    generate_image: "Yeni Görsel Üret",
    image_prompt_label: "Görsel Tarifi",
    image_prompt_placeholder: "Ürünü nasıl bir sahnede görmek istersiniz?",
    image_alt_placeholder: "Alternatif metin (SEO)",
    start_production: "Üretimi Başlat",
    format: "Format",
    quality: "Kalite",
    quick_edit: "Hızlı Düzenleme",
    edit_placeholder: "Örn: arka planı beyaz yap",
    apply: "Uygula",
    download_all: "Tümünü İndir (ZIP)",
    download_image: "Görseli İndir",
    make_video: "Tanıtım Videosu",
    video_prompt_label: "Video Tarifi",
    duration: "Süre",
    music: "Müzik",
    source_image: "Kaynak Görsel",
    video_ready: "Video hazır",
    play: "Oynat",
    save_video: "Videoyu Kaydet",
    close: "Kapat",
    product_image: "Ürün Görseli",
    generated_badge: "YZ",

    suggested_price: "Önerilen Fiyat",
    market_average: "Piyasa ortalaması",
    product_story: "Ürün Hikayesi",
    top_features: "Öne Çıkan Özellikler",
    edit_listing: "Düzenle",
    done: "Bitti",
    copy: "Kopyala",
    export: "Dışa Aktar",
    export_pdf: "PDF olarak indir",
    export_word: "Word olarak indir",
    export_html: "HTML olarak indir",
    export_png: "Kartı PNG olarak indir",

    label_title: "Başlık",
    label_category: "Kategori",
    label_price: "Fiyat",
    label_description: "Açıklama",
    label_product_description: "Ürün Açıklaması",
    label_features: "Özellikler",
    label_key_features: "Önemli Özellikler",
    label_tags: "Etiketler",

    hint_api_key: "API anahtarı geçersiz. Lütfen GEMINI_API_KEY değerini kontrol edin.",
    hint_missing_api_key: "API anahtarı bulunamadı. Uygulamayı başlatmadan önce şu ortam değişkenini ayarlayın:",
    hint_quota: "API kullanım limitine ulaşıldı. Lütfen daha sonra tekrar deneyin.",
    hint_network: "İnternet bağlantınızı kontrol edin.",
    hint_bad_request: "Geçersiz istek. Lütfen resim formatını kontrol edin.",
    hint_forbidden: "API erişim izni yok. API anahtarınızı kontrol edin.",
    hint_not_found: "Model bulunamadı. Lütfen model adını kontrol edin.",
    hint_server: "Sunucu hatası. Lütfen daha sonra tekrar deneyin.",
    hint_other: "Hata",
};

static EN: Strings = Strings {
    app_title: "Listing Studio",
    tagline: "E-COMMERCE INTELLIGENCE",
    hero_title: "Get Your Product Ready to Sell with AI",
    hero_desc: "Upload your photos and get a title, description, price suggestion, tags, fresh imagery and a promo video in seconds.",
    add_image: "Add Image",
    product_name_hint: "Product name (optional)",
    description_hint: "Additional description (optional)",
    tech_docs: "Technical Documents",
    add_docs: "Add Document",
    start_analysis: "Start Analysis",
    new_product: "New Product",
    reset_confirm: "All content will be cleared. Start a new product?",
    yes: "Yes",
    cancel: "Cancel",
    ok: "OK",
    error_title: "Something went wrong",
    ai_working: "AI at Work",

    analyzing: "Analyzing product...",
    studio_lights: "Setting up studio lights...",
    pixels_processing: "Processing pixels...",
    director_chair: "In the director's chair",
    preparing_export: "Preparing export...",
    video_stage_first: "Shooting the first scene",
    video_stage_extend: "Shooting the continuation",
    video_stage_download: "Downloading video",
    poll_count: "checks",

    need_image: "Please upload at least one image.",
    analysis_failed: "Could not analyze product. Please try again.",
    generation_failed: "Could not generate variation.",
    edit_failed: "Could not edit image.",
    video_failed: "Could not generate video.",
    export_failed: "Export failed.",
    copy_success: "Content copied to clipboard!",
    export_saved: "Saved",

    gallery: "Gallery",
    generate_image: "Generate New Image",
    image_prompt_label: "Image Prompt",
    image_prompt_placeholder: "What scene should the product appear in?",
    image_alt_placeholder: "Alt text (SEO)",
    start_production: "Start Production",
    format: "Format",
    quality: "Quality",
    quick_edit: "Quick Edit",
    edit_placeholder: "e.g. make the background white",
    apply: "Apply",
    download_all: "Download All (ZIP)",
    download_image: "Download Image",
    make_video: "Promo Video",
    video_prompt_label: "Video Prompt",
    duration: "Duration",
    music: "Music",
    source_image: "Source Image",
    video_ready: "Video ready",
    play: "Play",
    save_video: "Save Video",
    close: "Close",
    product_image: "Product Image",
    generated_badge: "AI",

    suggested_price: "Suggested Price",
    market_average: "Market average",
    product_story: "Product Story",
    top_features: "Top Features",
    edit_listing: "Edit",
    done: "Done",
    copy: "Copy",
    export: "Export",
    export_pdf: "Download as PDF",
    export_word: "Download as Word",
    export_html: "Download as HTML",
    export_png: "Download card as PNG",

    label_title: "Title",
    label_category: "Category",
    label_price: "Price",
    label_description: "Description",
    label_product_description: "Description",
    label_features: "Features",
    label_key_features: "Key Features",
    label_tags: "Tags",

    hint_api_key: "The API key is invalid. Please check GEMINI_API_KEY.",
    hint_missing_api_key: "No API key found. Set this environment variable before launching:",
    hint_quota: "API usage limit reached. Please try again later.",
    hint_network: "Please check your internet connection.",
    hint_bad_request: "Invalid request. Please check the image format.",
    hint_forbidden: "No API access. Please check your API key.",
    hint_not_found: "Model not found. Please check the model name.",
    hint_server: "Server error. Please try again later.",
    hint_other: "Error",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_switches_between_locales() {
        assert_eq!(Lang::Tr.toggle(), Lang::En);
        assert_eq!(Lang::En.toggle().toggle(), Lang::En);
        assert_eq!(Lang::default(), Lang::Tr);
    }

    #[test]
    fn tables_are_distinct() {
        assert_ne!(Lang::Tr.strings().label_category, Lang::En.strings().label_category);
        assert_eq!(Lang::En.strings().label_tags, "Tags");
        assert_eq!(serde_json::to_string(&Lang::En).unwrap(), "\"en\"");
    }
}
