use anyhow::{bail, Context, Result};

use crate::cli::{self, ImageArgs};
use crate::forms::CategoryForm;
use crate::image::{is_data_uri, read_as_data_uri};
use crate::search::filter_by_name;
use crate::stores::CategoryStore;
use crate::types::{Category, CategoryId, CategoryPatch};

impl cli::CategoryCmd {
    pub async fn run(&self, store: &CategoryStore) -> Result<()> {
        match self {
            cli::CategoryCmd::List { search } => {
                let all = store.list();
                let shown = filter_by_name(&all, search.as_deref().unwrap_or(""));
                if shown.is_empty() {
                    println!("No categories found");
                }
                for category in &shown {
                    println!("{}", summary_line(category));
                }
                Ok(())
            }
            cli::CategoryCmd::Get { id } => {
                let category = store
                    .get(&CategoryId::new(id.as_str()))
                    .with_context(|| format!("category {id} not found"))?;
                println!("{}", serde_json::to_string_pretty(&category)?);
                Ok(())
            }
            cli::CategoryCmd::Add {
                name,
                item_count,
                image,
            } => {
                let mut form = CategoryForm {
                    name: name.clone(),
                    item_count: item_count.clone(),
                    ..Default::default()
                };
                apply_image(&mut form, image).await?;
                let new = form.validate()?;

                let created = store.create(new).await.context("creating category")?;
                log::info!("created category {}", created.id);
                println!("{}", summary_line(&created));
                Ok(())
            }
            cli::CategoryCmd::Update {
                id,
                name,
                item_count,
                image,
            } => {
                let id = CategoryId::new(id.as_str());
                let existing = store
                    .get(&id)
                    .with_context(|| format!("category {id} not found"))?;

                let mut form = CategoryForm::from_category(&existing);
                if let Some(name) = name {
                    form.name = name.clone();
                }
                if let Some(item_count) = item_count {
                    form.item_count = item_count.clone();
                }
                apply_image(&mut form, image).await?;
                let validated = form.validate()?;

                let patch = CategoryPatch {
                    name: name.as_ref().map(|_| validated.name.clone()),
                    item_count: item_count.as_ref().map(|_| validated.item_count),
                    image_url: image_changed(image).then(|| validated.image_url.clone()),
                };
                if patch.is_empty() {
                    bail!("nothing to update; pass --name, --item-count, --image-url or --image-file");
                }

                let updated = store
                    .update(&id, patch)
                    .await
                    .context("updating category")?;
                println!("{}", summary_line(&updated));
                Ok(())
            }
            cli::CategoryCmd::Delete { id } => {
                let id = CategoryId::new(id.as_str());
                match store.delete(&id).await.context("deleting category")? {
                    Some(removed) => println!("Deleted {}", summary_line(&removed)),
                    None => println!("No category with id {id}; nothing deleted"),
                }
                Ok(())
            }
        }
    }
}

fn image_changed(image: &ImageArgs) -> bool {
    image.image_url.is_some() || image.image_file.is_some()
}

/// A selected file replaces any typed URL, as the form does.
async fn apply_image(form: &mut CategoryForm, image: &ImageArgs) -> Result<()> {
    if let Some(url) = &image.image_url {
        form.image_url = url.clone();
        form.image_preview = None;
    }
    if let Some(path) = &image.image_file {
        let uri = read_as_data_uri(path).await?;
        form.image_url.clear();
        form.image_preview = Some(uri);
    }
    Ok(())
}

fn summary_line(category: &Category) -> String {
    let image = if is_data_uri(&category.image_url) {
        "(embedded image)"
    } else {
        category.image_url.as_str()
    };
    format!(
        "{:<15} {:<24} {:>6} items  {}",
        category.id, category.name, category.item_count, image
    )
}
