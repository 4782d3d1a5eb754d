mod contact;
mod credentials;
mod notice;

pub use contact::ContactForm;
pub use credentials::AuthForm;
pub use notice::NoticeBanner;

/// Classes shared by every text input
const INPUT_CLASS: &str = "w-full px-3 py-2 border border-gray-300 rounded-md shadow-sm \
                           focus:ring-indigo-500 focus:border-indigo-500";
/// Classes shared by every input label
const LABEL_CLASS: &str = "flex items-center text-sm font-medium text-gray-700 mb-1";
/// Classes of the primary (filled) button
const PRIMARY_BUTTON_CLASS: &str = "w-full flex items-center justify-center px-4 py-2 border \
                                    border-transparent rounded-md shadow-sm text-white \
                                    bg-indigo-600 hover:bg-indigo-700 disabled:opacity-50";
/// Classes of the secondary (outlined) button
const SECONDARY_BUTTON_CLASS: &str = "w-full flex items-center justify-center px-4 py-2 border \
                                      border-indigo-600 rounded-md shadow-sm text-indigo-600 \
                                      bg-white hover:bg-indigo-50 disabled:opacity-50";
