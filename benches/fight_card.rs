// benches/fight_card.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ufcstats_scrape::config::options::IndexSource;
use ufcstats_scrape::specs::{event_index, fight_card};

/// A 14-bout card shaped like a real results page.
fn sample_event() -> String {
    let rows: String = (0..14)
        .map(|i| {
            format!(
                r#"<tr class="b-fight-details__table-row b-fight-details__table-row__hover">
                     <td class="b-fight-details__table-col"><p><a class="b-flag"><i class="b-flag__inner"><i class="b-flag__text">win</i></i></a></p></td>
                     <td class="b-fight-details__table-col">
                       <p><a href="http://ufcstats.com/fighter-details/a{i}">Fighter A{i}</a></p>
                       <p><a href="http://ufcstats.com/fighter-details/b{i}">Fighter B{i}</a></p>
                     </td>
                     <td class="b-fight-details__table-col"><p>1</p>
                       <p>0</p></td>
                     <td class="b-fight-details__table-col"><p>{s1}</p>
                       <p>{s2}</p></td>
                     <td class="b-fight-details__table-col"><p>2</p>
                       <p>0</p></td>
                     <td class="b-fight-details__table-col"><p>0</p>
                       <p>1</p></td>
                     <td class="b-fight-details__table-col"><p>
                       Welterweight
                     </p></td>
                     <td class="b-fight-details__table-col"><p>U-DEC</p></td>
                     <td class="b-fight-details__table-col"><p>3</p></td>
                     <td class="b-fight-details__table-col"><p>5:00</p></td>
                   </tr>"#,
                s1 = 40 + i,
                s2 = 30 + i,
            )
        })
        .collect();
    format!(
        r#"<html><body>
             <h2 class="b-content__title"><span>UFC 300: Pereira vs. Hill</span></h2>
             <ul><li class="b-list__box-list-item"><i>Date:</i>
               April 13, 2024
             </li></ul>
             <table class="b-fight-details__table">
               <thead><tr class="b-fight-details__table-row"><th>W/L</th></tr></thead>
               <tbody>{rows}</tbody>
             </table>
           </body></html>"#
    )
}

/// Listing with a few hundred events after the two header rows.
fn sample_index() -> String {
    let rows: String = (0..700)
        .map(|i| {
            format!(
                r#"<tr class="b-statistics__table-row"><td class="b-statistics__table-col">
                     <i class="b-statistics__table-content">
                       <a href="http://ufcstats.com/event-details/{i:016x}">UFC Fight Night {i}</a>
                       <span class="b-statistics__date">March 02, 2019</span>
                     </i></td><td class="b-statistics__table-col">Las Vegas, Nevada, USA</td></tr>"#
            )
        })
        .collect();
    format!(
        r#"<table><tr class="b-statistics__table-row"><th>Name/date</th></tr>
             <tr class="b-statistics__table-row"><td></td></tr>{rows}</table>"#
    )
}

fn bench_parsers(c: &mut Criterion) {
    let event = sample_event();
    let index = sample_index();
    let src = IndexSource::default();

    c.bench_function("fight_card_parse", |b| {
        b.iter(|| {
            let recs = fight_card::parse_event_page(black_box(&event));
            black_box(recs.len())
        })
    });

    c.bench_function("event_index_parse", |b| {
        b.iter(|| {
            let events = event_index::parse_index(black_box(&index), &src);
            black_box(events.len())
        })
    });
}

criterion_group!(benches, bench_parsers);
criterion_main!(benches);
