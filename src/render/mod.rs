mod markup;
mod pages;
mod portable_text;

pub use self::{
    markup::Markup,
    pages::{index_page, not_found_page, plant_page, plants_page},
    portable_text::render_blocks,
};
