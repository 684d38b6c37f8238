pub mod header;
pub mod match_gallery;
pub mod notice_stack;
pub mod pagination_bar;
pub mod result_card;
pub mod result_pager;
pub mod upload_form;
